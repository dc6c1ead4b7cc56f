//! Participant store trait and its backends.

pub mod memory;
/// PostgreSQL backend.
#[cfg(feature = "postgres-store")]
pub mod postgres;

use crate::dao::models::{ParticipantEntity, ParticipantId};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;

/// Abstraction over the persistence layer for raffle participants.
///
/// Implementations own email uniqueness: two concurrent inserts of the same
/// email must never both yield an id, whatever the caller does around them.
pub trait ParticipantStore: Send + Sync {
    /// Insert `email` unless it is already stored.
    ///
    /// Returns the freshly assigned id, or `None` when the email was present.
    fn insert_if_absent(&self, email: String)
    -> BoxFuture<'static, StorageResult<Option<ParticipantId>>>;
    /// Every stored id, in no particular order.
    fn list_ids(&self) -> BoxFuture<'static, StorageResult<Vec<ParticipantId>>>;
    /// Every stored participant ordered by ascending id.
    fn list_participants(&self) -> BoxFuture<'static, StorageResult<Vec<ParticipantEntity>>>;
    /// Cheap round trip proving the backend answers.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! Store doubles for exercising failure paths.

    use futures::future::BoxFuture;

    use super::ParticipantStore;
    use crate::dao::{
        models::{ParticipantEntity, ParticipantId},
        storage::{StorageError, StorageResult},
    };

    /// Store whose every call fails as if the database were down.
    pub struct UnavailableStore;

    fn refused<T: Send + 'static>() -> BoxFuture<'static, StorageResult<T>> {
        Box::pin(async {
            Err(StorageError::unavailable(
                "connection refused".into(),
                std::io::Error::from(std::io::ErrorKind::ConnectionRefused),
            ))
        })
    }

    impl ParticipantStore for UnavailableStore {
        fn insert_if_absent(
            &self,
            _email: String,
        ) -> BoxFuture<'static, StorageResult<Option<ParticipantId>>> {
            refused()
        }

        fn list_ids(&self) -> BoxFuture<'static, StorageResult<Vec<ParticipantId>>> {
            refused()
        }

        fn list_participants(&self) -> BoxFuture<'static, StorageResult<Vec<ParticipantEntity>>> {
            refused()
        }

        fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
            refused()
        }
    }
}
