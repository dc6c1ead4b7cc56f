//! PostgreSQL participant store built on sqlx.

mod config;
mod error;
mod store;

use crate::dao::storage::StorageError;

pub use config::PostgresConfig;
pub use error::{PostgresDaoError, PostgresResult};
pub use store::PostgresParticipantStore;

impl From<PostgresDaoError> for StorageError {
    fn from(err: PostgresDaoError) -> Self {
        StorageError::unavailable(err.to_string(), err)
    }
}
