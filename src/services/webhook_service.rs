use tracing::info;

use crate::{error::ServiceError, state::SharedState, telegram::WebhookRegistration};

/// Point Telegram at this service's webhook endpoint.
///
/// Returns the registered URL.
pub async fn register_webhook(state: &SharedState) -> Result<String, ServiceError> {
    let config = state.config();
    let url = config
        .webhook_url()
        .ok_or_else(|| ServiceError::NotConfigured("BASE_URL is not set".into()))?;

    state
        .telegram()
        .set_webhook(WebhookRegistration {
            url: url.clone(),
            secret_token: config.webhook_secret.clone(),
        })
        .await?;

    info!(%url, "webhook registered");
    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        dao::participant_store::memory::MemoryParticipantStore,
        state::testing,
        telegram::testing::{RecordingTelegram, SentItem},
    };

    fn state_with(
        extra: &[(&str, &str)],
        telegram: &RecordingTelegram,
    ) -> SharedState {
        let (state, _updates) = testing::state(
            testing::config(extra),
            Arc::new(MemoryParticipantStore::new()),
            Arc::new(telegram.clone()),
        );
        state
    }

    #[tokio::test]
    async fn registration_requires_a_base_url() {
        let telegram = RecordingTelegram::new();
        let state = state_with(&[], &telegram);

        let err = register_webhook(&state).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotConfigured(_)));
        assert!(telegram.sent().is_empty());
    }

    #[tokio::test]
    async fn registration_sends_url_and_secret() {
        let telegram = RecordingTelegram::new();
        let state = state_with(
            &[("BASE_URL", "https://bot.example.com"), ("WEBHOOK_SECRET", "s3cret")],
            &telegram,
        );

        let url = register_webhook(&state).await.unwrap();
        assert_eq!(url, "https://bot.example.com/webhook");
        assert_eq!(
            telegram.sent(),
            vec![SentItem::Webhook(WebhookRegistration {
                url,
                secret_token: Some("s3cret".into()),
            })]
        );
    }

    #[tokio::test]
    async fn telegram_rejection_is_a_transport_error() {
        let telegram = RecordingTelegram::rejecting_webhooks();
        let state = state_with(&[("BASE_URL", "https://bot.example.com")], &telegram);

        let err = register_webhook(&state).await.unwrap_err();
        assert!(matches!(err, ServiceError::Transport(_)));
    }
}
