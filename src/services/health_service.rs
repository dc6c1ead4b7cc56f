use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Probe the participant store and report whether it answered.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.raffle().store().health_check().await {
        Ok(()) => HealthResponse::ok(),
        Err(err) => {
            warn!(error = %err, "storage health check failed");
            HealthResponse::degraded()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        dao::participant_store::{memory::MemoryParticipantStore, testing::UnavailableStore},
        state::testing,
        telegram::testing::RecordingTelegram,
    };

    #[tokio::test]
    async fn reachable_store_is_ok() {
        let (state, _updates) = testing::state(
            testing::config(&[]),
            Arc::new(MemoryParticipantStore::new()),
            Arc::new(RecordingTelegram::new()),
        );
        assert_eq!(health_status(&state).await.status, "ok");
    }

    #[tokio::test]
    async fn unreachable_store_is_degraded() {
        let (state, _updates) = testing::state(
            testing::config(&[]),
            Arc::new(UnavailableStore),
            Arc::new(RecordingTelegram::new()),
        );
        assert_eq!(health_status(&state).await.status, "degraded");
    }
}
