//! Process-local participant store used by tests and database-less runs.

use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::Mutex;

use crate::dao::{
    models::{ParticipantEntity, ParticipantId},
    storage::StorageResult,
};

use super::ParticipantStore;

/// First id handed out, matching a fresh PostgreSQL `SERIAL` sequence.
const FIRST_ID: ParticipantId = 1;

/// In-memory [`ParticipantStore`]; clones share the same table.
#[derive(Clone, Default)]
pub struct MemoryParticipantStore {
    table: Arc<Mutex<MemoryTable>>,
}

#[derive(Default)]
struct MemoryTable {
    last_id: Option<ParticipantId>,
    rows: Vec<ParticipantEntity>,
}

impl MemoryTable {
    fn next_id(&mut self) -> ParticipantId {
        let id = self.last_id.map_or(FIRST_ID, |last| last + 1);
        self.last_id = Some(id);
        id
    }
}

impl MemoryParticipantStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.table.lock().await.rows.len()
    }

    /// Whether no participant is stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl ParticipantStore for MemoryParticipantStore {
    fn insert_if_absent(
        &self,
        email: String,
    ) -> BoxFuture<'static, StorageResult<Option<ParticipantId>>> {
        let table = self.table.clone();
        Box::pin(async move {
            let mut table = table.lock().await;
            if table.rows.iter().any(|row| row.email == email) {
                return Ok(None);
            }
            let id = table.next_id();
            table.rows.push(ParticipantEntity::new(id, email));
            Ok(Some(id))
        })
    }

    fn list_ids(&self) -> BoxFuture<'static, StorageResult<Vec<ParticipantId>>> {
        let table = self.table.clone();
        Box::pin(async move { Ok(table.lock().await.rows.iter().map(|row| row.id).collect()) })
    }

    fn list_participants(&self) -> BoxFuture<'static, StorageResult<Vec<ParticipantEntity>>> {
        let table = self.table.clone();
        Box::pin(async move {
            // Rows are appended with increasing ids, so insertion order is id order.
            Ok(table.lock().await.rows.clone())
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
