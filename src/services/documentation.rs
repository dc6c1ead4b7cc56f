use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the raffle bot.
#[openapi(
    paths(
        crate::routes::health::liveness,
        crate::routes::health::healthcheck,
        crate::routes::webhook::receive_update,
        crate::routes::webhook::set_webhook,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::webhook::WebhookRegistrationResponse,
            crate::dto::telegram::Update,
            crate::dto::telegram::Message,
            crate::dto::telegram::Chat,
            crate::dto::telegram::User,
        )
    ),
    tags(
        (name = "health", description = "Liveness and health check endpoints"),
        (name = "telegram", description = "Telegram webhook endpoints"),
    )
)]
pub struct ApiDoc;
