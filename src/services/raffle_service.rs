//! Participant registration, random draw and export.

use std::sync::Arc;

use rand::{Rng, seq::IndexedRandom};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{
    dao::{
        models::{ParticipantEntity, ParticipantId},
        participant_store::ParticipantStore,
    },
    dto::validation::validate_email_candidate,
    error::ServiceError,
    services::display_code::DisplayCode,
};

/// Outcome of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// A new row was stored under this code.
    Registered(DisplayCode),
    /// The email is already stored; its code is deliberately not returned.
    AlreadyRegistered,
    /// The text did not look like an email; the store was not touched.
    Invalid,
}

/// Outcome of a draw request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The drawn participant.
    Winner(DisplayCode),
    /// Nobody is registered.
    NoParticipants,
    /// The caller is not the administrator.
    Unauthorized,
}

/// Outcome of an export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Every participant ordered by ascending id.
    Rows(Vec<ParticipantEntity>),
    /// Nobody is registered.
    Empty,
    /// The caller is not the administrator.
    Unauthorized,
}

/// Owns the participant store and the lock serializing registrations and draws.
///
/// The lock only orders work inside this process; email uniqueness across
/// processes is left to the store.
pub struct RaffleService {
    store: Arc<dyn ParticipantStore>,
    guard: Mutex<()>,
}

impl RaffleService {
    /// Wrap `store` with a fresh guard.
    pub fn new(store: Arc<dyn ParticipantStore>) -> Self {
        Self {
            store,
            guard: Mutex::new(()),
        }
    }

    /// Handle to the underlying store, used by health checks.
    pub fn store(&self) -> &Arc<dyn ParticipantStore> {
        &self.store
    }

    /// Register `raw_text` as a participant email.
    ///
    /// Surrounding whitespace is trimmed; the rest is stored as provided.
    pub async fn register(&self, raw_text: &str) -> Result<RegistrationOutcome, ServiceError> {
        let email = raw_text.trim();
        if let Err(err) = validate_email_candidate(email) {
            debug!(code = %err.code, "rejected registration candidate");
            return Ok(RegistrationOutcome::Invalid);
        }

        let inserted = {
            let _guard = self.guard.lock().await;
            self.store.insert_if_absent(email.to_owned()).await?
        };

        Ok(match inserted {
            Some(id) => {
                let code = DisplayCode::from_id(id);
                info!(%code, "participant registered");
                RegistrationOutcome::Registered(code)
            }
            None => RegistrationOutcome::AlreadyRegistered,
        })
    }

    /// Pick a winner uniformly at random among all current participants.
    ///
    /// The draw never mutates the store, so successive draws are independent.
    pub async fn draw_winner(&self, caller_is_admin: bool) -> Result<DrawOutcome, ServiceError> {
        if !caller_is_admin {
            return Ok(DrawOutcome::Unauthorized);
        }

        let winner = {
            let _guard = self.guard.lock().await;
            let ids = self.store.list_ids().await?;
            pick_uniform(&ids, &mut rand::rng())
        };

        Ok(match winner {
            Some(id) => {
                let code = DisplayCode::from_id(id);
                info!(%code, "raffle winner drawn");
                DrawOutcome::Winner(code)
            }
            None => DrawOutcome::NoParticipants,
        })
    }

    /// Snapshot every participant for the administrator.
    pub async fn export_all(&self, caller_is_admin: bool) -> Result<ExportOutcome, ServiceError> {
        if !caller_is_admin {
            return Ok(ExportOutcome::Unauthorized);
        }

        let rows = self.store.list_participants().await?;
        if rows.is_empty() {
            return Ok(ExportOutcome::Empty);
        }
        info!(count = rows.len(), "participants exported");
        Ok(ExportOutcome::Rows(rows))
    }
}

fn pick_uniform<R>(ids: &[ParticipantId], rng: &mut R) -> Option<ParticipantId>
where
    R: Rng + ?Sized,
{
    ids.choose(rng).copied()
}
