use crate::application::http::{
    detection::router::DetectionApiDoc,
    server::http_server::{__path_welcome, welcome},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ingredient Detection API",
        description = "Upload an image → Gemini detects ingredients → Saves results locally + to the pantry store.",
        version = "1.0.0"
    ),
    paths(welcome),
    nest(
        (path = "/detect", api = DetectionApiDoc),
    )
)]
pub struct ApiDoc;
