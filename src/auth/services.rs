use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::{
    auth::{
        dto::{LoginRequest, RegisterRequest},
        password::{hash_password, verify_password, DUMMY_HASH},
        repo::UserStore,
        repo_types::{NewUser, User},
    },
    error::AppError,
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Runs Argon2 work off the async worker threads.
async fn blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(e.into()))
}

/// Hashes the password and inserts one `users` row. Returns the stored username.
pub async fn register_user(
    store: &dyn UserStore,
    payload: RegisterRequest,
) -> Result<String, AppError> {
    let username = payload.username.trim();
    let email = normalize_email(&payload.email);

    if username.is_empty() {
        return Err(AppError::Validation("Username is required".into()));
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::Validation("Invalid email".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password is required".into()));
    }

    let password = payload.password;
    let hash = blocking(move || hash_password(&password))
        .await?
        .map_err(AppError::Internal)?;

    let new_user = NewUser {
        username,
        email: &email,
        password_hash: &hash,
    };
    store.insert(&new_user).await.map_err(|e| {
        warn!(email = %email, error = %e, "insert user failed");
        AppError::from(e)
    })?;

    info!(username = %username, email = %email, "user registered");
    Ok(username.to_string())
}

/// Looks the user up by email and checks the password.
///
/// Unknown email and wrong password both come back as `AppError::Unauthorized`,
/// and both pay for one Argon2 verification.
pub async fn authenticate(store: &dyn UserStore, payload: LoginRequest) -> Result<User, AppError> {
    let email = normalize_email(&payload.email);
    let password = payload.password;

    let Some(user) = store.find_by_email(&email).await? else {
        blocking(move || verify_password(&password, DUMMY_HASH)).await?;
        warn!(email = %email, "login unknown email");
        return Err(AppError::Unauthorized);
    };

    let stored = user.password_hash.clone();
    if !blocking(move || verify_password(&password, &stored)).await? {
        warn!(email = %email, "login invalid password");
        return Err(AppError::Unauthorized);
    }

    debug!(username = %user.username, "credentials verified");
    Ok(user)
}
