use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{
    Client, Response,
    multipart::{Form, Part},
};
use serde::{Serialize, de::DeserializeOwned, de::IgnoredAny};

use crate::dto::telegram::{ApiResponse, ChatId, SendMessageRequest, SetWebhookRequest};

use super::{
    OutgoingDocument, TelegramApi, WebhookRegistration,
    error::{TelegramError, TelegramResult},
};

const SEND_MESSAGE: &str = "sendMessage";
const SEND_DOCUMENT: &str = "sendDocument";
const SET_WEBHOOK: &str = "setWebhook";
/// Only plain messages are handled, so nothing else is requested from Telegram.
const ALLOWED_UPDATES: &[&str] = &["message"];

/// Bot API client talking JSON and multipart over HTTPS.
#[derive(Clone)]
pub struct HttpTelegramClient {
    client: Client,
    /// `{api_url}/bot{token}`; never logged.
    bot_url: Arc<str>,
}

impl HttpTelegramClient {
    /// Build a client for the bot identified by `token`.
    pub fn new(api_url: &str, token: &str) -> TelegramResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|source| TelegramError::ClientBuilder { source })?;

        let bot_url = Arc::<str>::from(format!("{}/bot{}", api_url.trim_end_matches('/'), token));
        Ok(Self { client, bot_url })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.bot_url, method)
    }

    async fn call_json<B, T>(&self, method: &'static str, body: &B) -> TelegramResult<T>
    where
        B: ?Sized + Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|source| TelegramError::RequestSend {
                method,
                source: source.without_url(),
            })?;

        decode(method, response).await
    }

    async fn call_multipart<T>(&self, method: &'static str, form: Form) -> TelegramResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.method_url(method))
            .multipart(form)
            .send()
            .await
            .map_err(|source| TelegramError::RequestSend {
                method,
                source: source.without_url(),
            })?;

        decode(method, response).await
    }
}

/// Unwrap the Bot API envelope.
///
/// Telegram reports failures with a 4xx status *and* a JSON body, so the body
/// is decoded before looking at the status.
async fn decode<T>(method: &'static str, response: Response) -> TelegramResult<T>
where
    T: DeserializeOwned,
{
    let status = response.status();
    let envelope = response
        .json::<ApiResponse<T>>()
        .await
        .map_err(|source| TelegramError::DecodeResponse {
            method,
            status,
            source: source.without_url(),
        })?;

    match envelope {
        ApiResponse {
            ok: true,
            result: Some(result),
            ..
        } => Ok(result),
        ApiResponse {
            description,
            error_code,
            ..
        } => Err(TelegramError::Api {
            method,
            error_code,
            description: description.unwrap_or_else(|| format!("no result (status {status})")),
        }),
    }
}

impl TelegramApi for HttpTelegramClient {
    fn send_message(&self, chat_id: ChatId, text: String) -> BoxFuture<'static, TelegramResult<()>> {
        let client = self.clone();
        Box::pin(async move {
            let body = SendMessageRequest {
                chat_id,
                text: &text,
            };
            client
                .call_json::<_, IgnoredAny>(SEND_MESSAGE, &body)
                .await
                .map(|_| ())
        })
    }

    fn send_document(
        &self,
        chat_id: ChatId,
        document: OutgoingDocument,
    ) -> BoxFuture<'static, TelegramResult<()>> {
        let client = self.clone();
        Box::pin(async move {
            let OutgoingDocument {
                file_name,
                mime_type,
                bytes,
                caption,
            } = document;

            let part = Part::bytes(bytes)
                .file_name(file_name)
                .mime_str(mime_type)
                .map_err(|source| TelegramError::RequestSend {
                    method: SEND_DOCUMENT,
                    source,
                })?;

            let mut form = Form::new()
                .text("chat_id", chat_id.to_string())
                .part("document", part);
            if let Some(caption) = caption {
                form = form.text("caption", caption);
            }

            client
                .call_multipart::<IgnoredAny>(SEND_DOCUMENT, form)
                .await
                .map(|_| ())
        })
    }

    fn set_webhook(
        &self,
        registration: WebhookRegistration,
    ) -> BoxFuture<'static, TelegramResult<()>> {
        let client = self.clone();
        Box::pin(async move {
            let body = SetWebhookRequest {
                url: &registration.url,
                secret_token: registration.secret_token.as_deref(),
                allowed_updates: ALLOWED_UPDATES,
            };
            client
                .call_json::<_, bool>(SET_WEBHOOK, &body)
                .await
                .map(|_| ())
        })
    }
}
