use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::auth::repo_types::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Email already registered")]
    Conflict,

    #[error("Incorrect email or password")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Conflict => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => AppError::Conflict,
            other => AppError::Internal(other.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(e) = &self {
            // detail stays in the log, the client gets the generic message
            error!(error = ?e, "request failed");
        }
        let body = serde_json::json!({
            "detail": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}
