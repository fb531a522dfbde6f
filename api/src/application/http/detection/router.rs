use axum::{Router, routing::post};
use utoipa::OpenApi;

use super::handlers::detect_ingredients::{__path_detect_ingredients, detect_ingredients};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(detect_ingredients))]
pub struct DetectionApiDoc;

pub fn detection_routes() -> Router<AppState> {
    Router::new().route("/detect", post(detect_ingredients))
}
