use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::envelope::Envelope;

/// Failures reported by the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("row not found")]
    NotFound,
    #[error("row already exists")]
    AlreadyExists,
    #[error("corrupt row: {0}")]
    Corrupt(String),
    #[error(transparent)]
    Backend(#[from] sqlx::Error),
}

/// Failures surfaced by the account and message services.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("authentication failed")]
    AuthFailed,
    #[error("not found")]
    NotFound,
    #[error("user already exists")]
    AlreadyExists,
    #[error("store error: {0}")]
    Store(StoreError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => AppError::NotFound,
            StoreError::AlreadyExists => AppError::AlreadyExists,
            other => AppError::Store(other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        warn!(error = %e, "rejected request body");
        AppError::Validation("failed to decode incoming message".into())
    }
}

impl AppError {
    pub fn code(&self) -> i32 {
        match self {
            AppError::Validation(_) => 1,
            AppError::AuthFailed => 2,
            AppError::NotFound => 3,
            AppError::AlreadyExists => 4,
            AppError::Store(_) | AppError::Internal(_) => 5,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::AuthFailed => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::AlreadyExists => StatusCode::CONFLICT,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Store(e) => {
                error!(error = %e, "store failure");
                "internal error".to_string()
            }
            AppError::Internal(e) => {
                error!(error = %e, "internal failure");
                "internal error".to_string()
            }
            other => other.to_string(),
        };
        (self.status(), Json(Envelope::failure(self.code(), message))).into_response()
    }
}
