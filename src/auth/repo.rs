use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::repo_types::{NewUser, StoreError, User};

/// Credential store seam. One call issues at most one statement.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: &NewUser<'_>) -> Result<(), StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    /// Insert a new user. A duplicate email surfaces as `StoreError::Duplicate`.
    async fn insert(&self, user: &NewUser<'_>) -> Result<(), StoreError> {
        // connection goes back to the pool on drop, on every path
        let mut conn = self.pool.acquire().await?;
        sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user.username)
        .bind(user.email)
        .bind(user.password_hash)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Find a user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT username, email, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(user)
    }
}
