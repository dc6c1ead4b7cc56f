//! Outbound side of the Telegram transport.

mod client;
mod error;

use futures::future::BoxFuture;

use crate::dto::telegram::ChatId;

pub use client::HttpTelegramClient;
pub use error::{TelegramError, TelegramResult};

/// A file attachment to upload with `sendDocument`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingDocument {
    /// File name shown in the chat.
    pub file_name: String,
    /// Content type of the upload.
    pub mime_type: &'static str,
    /// File contents.
    pub bytes: Vec<u8>,
    /// Text shown under the document.
    pub caption: Option<String>,
}

/// Parameters of a `setWebhook` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookRegistration {
    /// Public URL of the webhook endpoint.
    pub url: String,
    /// Echoed back by Telegram in `X-Telegram-Bot-Api-Secret-Token`.
    pub secret_token: Option<String>,
}

/// Abstraction over the Bot API calls the bot needs.
pub trait TelegramApi: Send + Sync {
    /// Send a plain text message.
    fn send_message(&self, chat_id: ChatId, text: String) -> BoxFuture<'static, TelegramResult<()>>;
    /// Upload a document to a chat.
    fn send_document(
        &self,
        chat_id: ChatId,
        document: OutgoingDocument,
    ) -> BoxFuture<'static, TelegramResult<()>>;
    /// Point Telegram at the webhook endpoint.
    fn set_webhook(&self, registration: WebhookRegistration)
    -> BoxFuture<'static, TelegramResult<()>>;
}
