use sqlx::FromRow;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub username: String,
    pub email: String,             // unique, login identifier
    pub password_hash: String,     // Argon2 PHC string
}

/// Row to insert on registration.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already registered")]
    Duplicate,
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return StoreError::Duplicate;
            }
        }
        StoreError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use std::{error::Error as StdError, fmt};

    use sqlx::error::{DatabaseError, ErrorKind};

    use super::*;

    /// Stand-in for a driver error carrying a constraint classification.
    #[derive(Debug)]
    struct ConstraintError {
        unique: bool,
    }

    impl fmt::Display for ConstraintError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.message())
        }
    }

    impl StdError for ConstraintError {}

    impl DatabaseError for ConstraintError {
        fn message(&self) -> &str {
            if self.unique {
                "duplicate key value violates unique constraint \"users_email_key\""
            } else {
                "null value in column \"username\" violates not-null constraint"
            }
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            if self.unique {
                ErrorKind::UniqueViolation
            } else {
                ErrorKind::NotNullViolation
            }
        }
    }

    fn db_error(unique: bool) -> sqlx::Error {
        sqlx::Error::Database(Box::new(ConstraintError { unique }))
    }

    #[test]
    fn unique_violation_becomes_duplicate() {
        assert!(matches!(StoreError::from(db_error(true)), StoreError::Duplicate));
    }

    #[test]
    fn other_database_errors_stay_database() {
        assert!(matches!(
            StoreError::from(db_error(false)),
            StoreError::Database(sqlx::Error::Database(_))
        ));
        assert!(matches!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::Database(_)
        ));
    }

    #[test]
    fn unique_violation_surfaces_as_conflict() {
        use crate::error::AppError;

        let err = AppError::from(StoreError::from(db_error(true)));
        assert!(matches!(err, AppError::Conflict));
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }
}
