//! Telegram webhook endpoints.

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};

use crate::{
    dto::{telegram::Update, webhook::WebhookRegistrationResponse},
    error::AppError,
    services::webhook_service,
    state::SharedState,
};

/// Path Telegram delivers updates to.
pub const WEBHOOK_PATH: &str = "/webhook";
const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Webhook intake plus the endpoint that registers it with Telegram.
pub fn router(state: SharedState) -> Router<SharedState> {
    let intake = Router::new()
        .route(WEBHOOK_PATH, post(receive_update))
        .route_layer(middleware::from_fn_with_state(state, require_webhook_secret));

    intake.route("/set_webhook", get(set_webhook))
}

/// Accept an update from Telegram and queue it for the dispatcher.
#[utoipa::path(
    post,
    path = "/webhook",
    tag = "telegram",
    request_body = Update,
    params(("X-Telegram-Bot-Api-Secret-Token" = Option<String>, Header, description = "Required when WEBHOOK_SECRET is configured")),
    responses(
        (status = 200, description = "Update queued"),
        (status = 401, description = "Secret token missing or wrong"),
        (status = 503, description = "Dispatcher is not running")
    )
)]
pub async fn receive_update(
    State(state): State<SharedState>,
    Json(update): Json<Update>,
) -> Result<StatusCode, AppError> {
    state.enqueue_update(update).await?;
    Ok(StatusCode::OK)
}

/// Register `{BASE_URL}/webhook` with Telegram.
#[utoipa::path(
    get,
    path = "/set_webhook",
    tag = "telegram",
    responses(
        (status = 200, description = "Webhook registered", body = WebhookRegistrationResponse),
        (status = 409, description = "BASE_URL is not configured"),
        (status = 502, description = "Telegram rejected the call")
    )
)]
pub async fn set_webhook(
    State(state): State<SharedState>,
) -> Result<Json<WebhookRegistrationResponse>, AppError> {
    let url = webhook_service::register_webhook(&state).await?;
    Ok(Json(WebhookRegistrationResponse { url, ok: true }))
}

async fn require_webhook_secret(
    State(state): State<SharedState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.config().webhook_secret.as_deref() else {
        return Ok(next.run(req).await);
    };

    let provided = req
        .headers()
        .get(SECRET_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(token) if token == expected => Ok(next.run(req).await),
        Some(_) => Err(AppError::Unauthorized("invalid webhook secret token".into())),
        None => Err(AppError::Unauthorized(
            "missing header `X-Telegram-Bot-Api-Secret-Token`".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::to_bytes;
    use serde_json::{Value, json};
    use tokio::sync::mpsc;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        dao::participant_store::{
            ParticipantStore, memory::MemoryParticipantStore, testing::UnavailableStore,
        },
        routes,
        state::testing,
        telegram::testing::RecordingTelegram,
    };

    fn app(
        extra: &[(&str, &str)],
        store: Arc<dyn ParticipantStore>,
        telegram: RecordingTelegram,
    ) -> (Router<()>, mpsc::Receiver<Update>) {
        let (state, updates) =
            testing::state(testing::config(extra), store, Arc::new(telegram));
        (routes::router(state), updates)
    }

    fn update_request(secret: Option<&str>) -> Request<Body> {
        let body = json!({
            "update_id": 10,
            "message": {
                "message_id": 1,
                "chat": { "id": 7, "type": "private" },
                "from": { "id": 7, "is_bot": false, "first_name": "A" },
                "text": "a@b.com"
            }
        });
        let mut builder = Request::builder()
            .method("POST")
            .uri(WEBHOOK_PATH)
            .header("content-type", "application/json");
        if let Some(secret) = secret {
            builder = builder.header("X-Telegram-Bot-Api-Secret-Token", secret);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn update_is_queued_and_acknowledged() {
        let (app, mut updates) = app(
            &[],
            Arc::new(MemoryParticipantStore::new()),
            RecordingTelegram::new(),
        );

        let response = app.oneshot(update_request(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let queued = updates.try_recv().unwrap();
        assert_eq!(queued.update_id, 10);
        assert_eq!(
            queued.message.and_then(|message| message.text).as_deref(),
            Some("a@b.com")
        );
    }

    #[tokio::test]
    async fn wrong_or_missing_secret_is_rejected() {
        for secret in [None, Some("guess")] {
            let (app, mut updates) = app(
                &[("WEBHOOK_SECRET", "s3cret")],
                Arc::new(MemoryParticipantStore::new()),
                RecordingTelegram::new(),
            );

            let response = app.oneshot(update_request(secret)).await.unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "secret {secret:?}");
            assert!(updates.try_recv().is_err());
        }
    }

    #[tokio::test]
    async fn matching_secret_is_accepted() {
        let (app, mut updates) = app(
            &[("WEBHOOK_SECRET", "s3cret")],
            Arc::new(MemoryParticipantStore::new()),
            RecordingTelegram::new(),
        );

        let response = app.oneshot(update_request(Some("s3cret"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(updates.try_recv().is_ok());
    }

    #[tokio::test]
    async fn closed_queue_is_service_unavailable() {
        let (app, updates) = app(
            &[],
            Arc::new(MemoryParticipantStore::new()),
            RecordingTelegram::new(),
        );
        drop(updates);

        let response = app.oneshot(update_request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn set_webhook_without_base_url_conflicts() {
        let telegram = RecordingTelegram::new();
        let (app, _updates) = app(
            &[],
            Arc::new(MemoryParticipantStore::new()),
            telegram.clone(),
        );

        let response = app.oneshot(get_request("/set_webhook")).await.unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(telegram.sent().is_empty());
    }

    #[tokio::test]
    async fn set_webhook_reports_registered_url() {
        let (app, _updates) = app(
            &[("BASE_URL", "https://bot.example.com/"), ("WEBHOOK_SECRET", "s3cret")],
            Arc::new(MemoryParticipantStore::new()),
            RecordingTelegram::new(),
        );

        // The secret only guards update intake.
        let response = app.oneshot(get_request("/set_webhook")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({ "url": "https://bot.example.com/webhook", "ok": true })
        );
    }

    #[tokio::test]
    async fn set_webhook_rejected_by_telegram_is_bad_gateway() {
        let (app, _updates) = app(
            &[("BASE_URL", "https://bot.example.com")],
            Arc::new(MemoryParticipantStore::new()),
            RecordingTelegram::rejecting_webhooks(),
        );

        let response = app.oneshot(get_request("/set_webhook")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn liveness_and_healthcheck() {
        let (app, _updates) = app(&[], Arc::new(UnavailableStore), RecordingTelegram::new());

        let response = app.clone().oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");

        let response = app.oneshot(get_request("/healthcheck")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "status": "degraded" }));
    }
}
