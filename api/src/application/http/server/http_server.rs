use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{info, info_span};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use pantryscan_core::{application::create_service, domain::common::PantryScanConfig};

use crate::application::http::detection::router::detection_routes;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use crate::application::http::server::openapi::ApiDoc;
use crate::args::Args;

pub async fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let config = PantryScanConfig::from(args.as_ref().clone());
    let service = create_service(config).await?;

    Ok(AppState::new(args, service))
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "detection",
    summary = "Welcome message",
    responses(
        (status = 200, body = WelcomeResponse)
    ),
)]
pub async fn welcome() -> Response<WelcomeResponse> {
    Response::OK(WelcomeResponse {
        message: "Welcome to the Ingredient Detection API. Use POST /detect to upload an image."
            .to_string(),
    })
}

/// Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Router {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let openapi = ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/", get(welcome))
        .merge(detection_routes())
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(state: AppState) -> Result<(), anyhow::Error> {
    let addr = format!("{}:{}", state.args.server.host, state.args.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("listening on {}", addr);

    axum::serve(listener, router(state)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_welcome_message() {
        let app: Router = Router::new().route("/", get(welcome));
        let server = TestServer::new(app);

        let response = server.get("/").await;
        response.assert_status_ok();

        let body: WelcomeResponse = response.json();
        assert_eq!(
            body.message,
            "Welcome to the Ingredient Detection API. Use POST /detect to upload an image."
        );
    }
}
