//! Wire types for the subset of the Telegram Bot API the bot speaks.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Telegram chat identifier.
pub type ChatId = i64;
/// Telegram user identifier.
pub type UserId = i64;

#[derive(Debug, Clone, Deserialize, ToSchema)]
/// Incoming update pushed by Telegram to the webhook.
///
/// Only plain messages are modelled; every other update kind deserializes
/// with `message` unset and is ignored by the dispatcher.
pub struct Update {
    /// Monotonic update identifier assigned by Telegram.
    pub update_id: i64,
    /// New incoming message, if this update carries one.
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
/// A chat message.
pub struct Message {
    /// Identifier unique within the chat.
    pub message_id: i64,
    /// Chat the message belongs to; replies go there.
    pub chat: Chat,
    /// Sender; empty for messages sent on behalf of a channel.
    pub from: Option<User>,
    /// Text of a text message.
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
/// Chat a message was posted in.
pub struct Chat {
    /// Chat identifier.
    pub id: ChatId,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
/// Sender of a message.
pub struct User {
    /// User identifier, compared against the configured administrator.
    pub id: UserId,
    /// Whether the sender is a bot.
    #[serde(default)]
    pub is_bot: bool,
    /// Public username, if any.
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
/// Body of a `sendMessage` call.
pub struct SendMessageRequest<'a> {
    /// Target chat.
    pub chat_id: ChatId,
    /// Message text.
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
/// Body of a `setWebhook` call.
pub struct SetWebhookRequest<'a> {
    /// HTTPS URL updates are posted to.
    pub url: &'a str,
    /// Value Telegram echoes in the secret token header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_token: Option<&'a str>,
    /// Update kinds Telegram should deliver.
    pub allowed_updates: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
/// Envelope every Bot API method answers with.
pub struct ApiResponse<T> {
    /// Whether the call succeeded.
    pub ok: bool,
    /// Method result when `ok` is true.
    pub result: Option<T>,
    /// Human-readable error when `ok` is false.
    pub description: Option<String>,
    /// Error code when `ok` is false.
    pub error_code: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_message_update_deserializes() {
        let raw = r#"{
            "update_id": 10,
            "message": {
                "message_id": 7,
                "date": 1700000000,
                "chat": {"id": 555, "type": "private"},
                "from": {"id": 42, "is_bot": false, "first_name": "Ann"},
                "text": "a@b.com"
            }
        }"#;

        let update: Update = serde_json::from_str(raw).unwrap();
        let message = update.message.unwrap();
        assert_eq!(message.chat.id, 555);
        assert_eq!(message.from.unwrap().id, 42);
        assert_eq!(message.text.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn non_message_update_deserializes_without_message() {
        let raw = r#"{"update_id": 11, "edited_message": {"message_id": 1}}"#;
        let update: Update = serde_json::from_str(raw).unwrap();
        assert!(update.message.is_none());
    }

    #[test]
    fn error_envelope_carries_description() {
        let raw = r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#;
        let response: ApiResponse<serde::de::IgnoredAny> = serde_json::from_str(raw).unwrap();
        assert!(!response.ok);
        assert_eq!(response.error_code, Some(401));
        assert_eq!(response.description.as_deref(), Some("Unauthorized"));
    }
}
