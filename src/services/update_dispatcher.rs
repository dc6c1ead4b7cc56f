use tokio::sync::mpsc;
use tracing::{Instrument, info, info_span};

use crate::{dto::telegram::Update, services::bot_service, state::SharedState};

/// Drain the update queue, handling every update on its own task.
///
/// A panic or stalled store call only affects the task of the update that
/// caused it.
pub async fn run(state: SharedState, mut updates: mpsc::Receiver<Update>) {
    info!("update dispatcher started");
    while let Some(update) = updates.recv().await {
        let state = state.clone();
        let span = info_span!("update", update_id = update.update_id);
        tokio::spawn(
            async move { bot_service::handle_update(&state, update).await }.instrument(span),
        );
    }
    info!("update queue closed; dispatcher stopped");
}
