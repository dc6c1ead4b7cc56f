//! Swagger UI.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{services::documentation::ApiDoc, state::SharedState};

const SWAGGER_UI_PATH: &str = "/docs";
const OPENAPI_JSON_PATH: &str = "/api-doc/openapi.json";

/// Swagger UI over the webhook and health endpoints.
pub fn router(state: SharedState) -> Router<SharedState> {
    let ui: Router<SharedState> = SwaggerUi::new(SWAGGER_UI_PATH)
        .url(OPENAPI_JSON_PATH, ApiDoc::openapi())
        .into();

    ui.with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_http_endpoint() {
        let doc = ApiDoc::openapi();
        let mut paths: Vec<_> = doc.paths.paths.keys().map(String::as_str).collect();
        paths.sort_unstable();
        assert_eq!(paths, ["/", "/healthcheck", "/set_webhook", "/webhook"]);
    }
}
