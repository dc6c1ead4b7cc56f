//! Backend-neutral storage errors.

use std::error::Error;
use thiserror::Error;

/// Result alias for participant storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by participant stores regardless of the underlying database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not serve the request.
    #[error("participant store unavailable: {message}")]
    Unavailable {
        /// Backend error rendered for logs.
        message: String,
        /// Underlying backend error.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}
