use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    config::AppConfig,
    dao::participant_store::ParticipantStore,
    dto::telegram::Update,
    error::ServiceError,
    services::{authorization::AdminPolicy, raffle_service::RaffleService},
    telegram::TelegramApi,
};

/// Handle to [`AppState`] shared by routes and tasks.
pub type SharedState = Arc<AppState>;
/// Updates buffered between the webhook and the dispatcher before the webhook waits.
pub const UPDATE_QUEUE_CAPACITY: usize = 100;

/// Central application state shared by the HTTP routes and the update dispatcher.
pub struct AppState {
    config: AppConfig,
    raffle: RaffleService,
    telegram: Arc<dyn TelegramApi>,
    admin_policy: Arc<dyn AdminPolicy>,
    updates: mpsc::Sender<Update>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// Also returns the receiving end of the update queue, which the caller
    /// hands to the dispatcher.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn ParticipantStore>,
        telegram: Arc<dyn TelegramApi>,
        admin_policy: Arc<dyn AdminPolicy>,
    ) -> (SharedState, mpsc::Receiver<Update>) {
        let (tx, rx) = mpsc::channel(UPDATE_QUEUE_CAPACITY);
        let state = Arc::new(Self {
            config,
            raffle: RaffleService::new(store),
            telegram,
            admin_policy,
            updates: tx,
        });
        (state, rx)
    }

    /// Startup configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Registration, draw and export operations.
    pub fn raffle(&self) -> &RaffleService {
        &self.raffle
    }

    /// Outbound Bot API client.
    pub fn telegram(&self) -> &dyn TelegramApi {
        self.telegram.as_ref()
    }

    /// Decides who may run admin commands.
    pub fn admin_policy(&self) -> &dyn AdminPolicy {
        self.admin_policy.as_ref()
    }

    /// Queue an update for the dispatcher, waiting while the queue is full.
    pub async fn enqueue_update(&self, update: Update) -> Result<(), ServiceError> {
        self.updates
            .send(update)
            .await
            .map_err(|_| ServiceError::QueueClosed)
    }
}
