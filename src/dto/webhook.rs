//! Webhook registration payloads.

use serde::Serialize;
use utoipa::ToSchema;

/// Result of (re)registering the webhook with Telegram.
#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookRegistrationResponse {
    /// Webhook URL handed to Telegram.
    pub url: String,
    /// Whether Telegram accepted the registration.
    pub ok: bool,
}
