use futures::future::BoxFuture;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

use crate::dao::{
    models::{ParticipantEntity, ParticipantId},
    participant_store::ParticipantStore,
    storage::StorageResult,
};

use super::{
    config::PostgresConfig,
    error::{PostgresDaoError, PostgresResult},
};

const TABLE_NAME: &str = "participants";

const CREATE_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS participants (
        id SERIAL PRIMARY KEY,
        email TEXT UNIQUE NOT NULL
    )
";

// The NOT EXISTS guard keeps repeated registrations from drawing a sequence
// value; ON CONFLICT still covers inserts racing from other connections.
const INSERT_IF_ABSENT: &str = r"
    INSERT INTO participants (email)
    SELECT $1
    WHERE NOT EXISTS (SELECT 1 FROM participants WHERE email = $1)
    ON CONFLICT (email) DO NOTHING
    RETURNING id
";

/// [`ParticipantStore`] backed by a sqlx PostgreSQL pool.
#[derive(Clone)]
pub struct PostgresParticipantStore {
    pool: PgPool,
}

impl PostgresParticipantStore {
    /// Open the connection pool and make sure the participants table exists.
    pub async fn connect(config: PostgresConfig) -> PostgresResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.url)
            .await
            .map_err(|source| PostgresDaoError::Connect { source })?;

        let store = Self { pool };
        store.ensure_schema().await?;
        info!(table = TABLE_NAME, "PostgreSQL participant store ready");
        Ok(store)
    }

    async fn ensure_schema(&self) -> PostgresResult<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|source| PostgresDaoError::EnsureSchema {
                table: TABLE_NAME,
                source,
            })?;
        Ok(())
    }
}

impl ParticipantStore for PostgresParticipantStore {
    fn insert_if_absent(
        &self,
        email: String,
    ) -> BoxFuture<'static, StorageResult<Option<ParticipantId>>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            sqlx::query_scalar::<_, ParticipantId>(INSERT_IF_ABSENT)
                .bind(email)
                .fetch_optional(&pool)
                .await
                .map_err(|source| PostgresDaoError::Insert { source }.into())
        })
    }

    fn list_ids(&self) -> BoxFuture<'static, StorageResult<Vec<ParticipantId>>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            sqlx::query_scalar::<_, ParticipantId>("SELECT id FROM participants")
                .fetch_all(&pool)
                .await
                .map_err(|source| {
                    PostgresDaoError::Query {
                        table: TABLE_NAME,
                        source,
                    }
                    .into()
                })
        })
    }

    fn list_participants(&self) -> BoxFuture<'static, StorageResult<Vec<ParticipantEntity>>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            sqlx::query_as::<_, ParticipantEntity>(
                "SELECT id, email FROM participants ORDER BY id ASC",
            )
            .fetch_all(&pool)
            .await
            .map_err(|source| {
                PostgresDaoError::Query {
                    table: TABLE_NAME,
                    source,
                }
                .into()
            })
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            sqlx::query("SELECT 1")
                .execute(&pool)
                .await
                .map(|_| ())
                .map_err(|source| PostgresDaoError::Ping { source }.into())
        })
    }
}
