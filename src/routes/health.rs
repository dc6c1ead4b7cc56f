//! Liveness and health endpoints.

use axum::{Json, Router, extract::State, routing::get};

use crate::{dto::health::HealthResponse, services::health_service, state::SharedState};

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Process is up", body = String))
)]
/// Liveness probe; never touches the participant store.
pub async fn liveness() -> &'static str {
    "ok"
}

#[utoipa::path(
    get,
    path = "/healthcheck",
    tag = "health",
    responses((status = 200, description = "Service status, `degraded` when the store is unreachable", body = HealthResponse))
)]
/// Return the current health status and ping the participant store.
pub async fn healthcheck(State(state): State<SharedState>) -> Json<HealthResponse> {
    let status = health_service::health_status(&state).await;
    Json(status)
}

/// Configure the health routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/", get(liveness))
        .route("/healthcheck", get(healthcheck))
}
