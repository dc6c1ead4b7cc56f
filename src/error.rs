//! Service and HTTP error types.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;

use crate::{dao::storage::StorageError, telegram::TelegramError};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Participant store is unreachable or rejected the query.
    #[error("storage unavailable")]
    Unavailable(#[source] StorageError),
    /// The Bot API call failed.
    #[error("telegram request failed")]
    Transport(#[source] TelegramError),
    /// The update dispatcher is no longer running.
    #[error("update queue closed")]
    QueueClosed,
    /// An optional setting required by this operation is absent.
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Unavailable(err)
    }
}

impl From<TelegramError> for ServiceError {
    fn from(err: TelegramError) -> Self {
        ServiceError::Transport(err)
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request failed authentication.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Conflict with current configuration.
    #[error("conflict: {0}")]
    Conflict(String),
    /// An upstream service (Telegram) failed.
    #[error("bad gateway: {0}")]
    BadGateway(String),
    /// Service unavailable or degraded.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unavailable(source) => AppError::ServiceUnavailable(source.to_string()),
            ServiceError::Transport(source) => AppError::BadGateway(source.to_string()),
            ServiceError::QueueClosed => AppError::ServiceUnavailable("update queue closed".into()),
            ServiceError::NotConfigured(message) => AppError::Conflict(message),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}
