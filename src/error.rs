use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("Invalid API key")]
    InvalidApiKey,
    #[error("Invalid request: {0}")]
    BadRequest(&'static str),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Internal server error")]
    Internal,
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Classifies a driver error as either an outage or a genuine failure.
    ///
    /// Connection-level failures become `StorageUnavailable` so callers can degrade
    /// instead of failing the request.
    #[must_use]
    pub fn from_storage(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::StorageUnavailable(err.to_string()),
            other => Self::Database(other),
        }
    }

    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match self {
            Self::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
            Self::StorageUnavailable(msg) => {
                tracing::error!(message = %msg, "Storage unavailable reached the response layer");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
            Self::InvalidApiKey => {
                tracing::debug!("Rejected request with invalid API key");
                (StatusCode::UNAUTHORIZED, "invalid_api_key")
            }
            Self::BadRequest(code) => {
                tracing::debug!(code, "Bad request");
                (StatusCode::BAD_REQUEST, code)
            }
            Self::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, "method_not_allowed"),
            Self::Internal => {
                tracing::error!("Internal server error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let body = Json(json!({
            "ok": false,
            "error": code
        }));

        (status, body).into_response()
    }
}
