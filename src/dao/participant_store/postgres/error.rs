//! Error types shared by the PostgreSQL storage implementation.

use thiserror::Error;

/// Convenient result alias returning [`PostgresDaoError`] failures.
pub type PostgresResult<T> = Result<T, PostgresDaoError>;

/// Failures that can occur while interacting with PostgreSQL.
#[derive(Debug, Error)]
pub enum PostgresDaoError {
    /// The connection pool could not be established.
    #[error("failed to connect to PostgreSQL")]
    Connect {
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
    /// Creating the participants table failed.
    #[error("failed to ensure table `{table}` exists")]
    EnsureSchema {
        /// Table involved.
        table: &'static str,
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
    /// Inserting a participant failed.
    #[error("failed to insert participant")]
    Insert {
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
    /// Reading participants back failed.
    #[error("failed to query table `{table}`")]
    Query {
        /// Table involved.
        table: &'static str,
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
    /// Liveness probe against the pool failed.
    #[error("PostgreSQL health check failed")]
    Ping {
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
}
