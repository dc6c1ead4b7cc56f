//! Error types raised by the Telegram Bot API client.

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`TelegramError`] failures.
pub type TelegramResult<T> = Result<T, TelegramError>;

/// Failures that can occur while calling the Bot API.
///
/// Request URLs embed the bot token, so reqwest errors are stored with their
/// URL stripped.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build Telegram client")]
    ClientBuilder {
        /// Transport error with its URL removed.
        #[source]
        source: reqwest::Error,
    },
    /// The request never reached Telegram or the connection dropped.
    #[error("failed to send Telegram request `{method}`")]
    RequestSend {
        /// Bot API method name.
        method: &'static str,
        /// Transport error with its URL removed.
        #[source]
        source: reqwest::Error,
    },
    /// The response body was not a Bot API envelope.
    #[error("failed to decode Telegram response for `{method}` (status {status})")]
    DecodeResponse {
        /// Bot API method name.
        method: &'static str,
        /// HTTP status of the response.
        status: StatusCode,
        /// Transport error with its URL removed.
        #[source]
        source: reqwest::Error,
    },
    /// Telegram answered with `ok: false`.
    #[error("Telegram rejected `{method}`: {description}")]
    Api {
        /// Bot API method name.
        method: &'static str,
        /// Bot API error code, if provided.
        error_code: Option<i32>,
        /// Bot API error description.
        description: String,
    },
}
