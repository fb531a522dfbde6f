use axum::extract::{Multipart, State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};
use pantryscan_core::domain::detection::{
    entities::DetectionResult, ports::DetectionService, value_objects::DetectIngredientsInput,
};

const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct IngredientsResponse {
    pub ingredients: Vec<IngredientResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct IngredientResponse {
    pub name: String,
    pub confidence: f64,
}

impl From<DetectionResult> for IngredientsResponse {
    fn from(result: DetectionResult) -> Self {
        Self {
            ingredients: result
                .ingredients
                .into_iter()
                .map(|item| IngredientResponse {
                    name: item.name,
                    confidence: item.confidence,
                })
                .collect(),
        }
    }
}

#[utoipa::path(
    post,
    path = "",
    tag = "detection",
    summary = "Detect ingredients in an image",
    description = "Uploads an image, runs LLM ingredient detection, and syncs the detections to the pantry store",
    responses(
        (status = 200, body = IngredientsResponse, description = "Detected ingredients with confidence scores"),
        (status = 400, description = "Upload is not an image"),
        (status = 502, description = "Upstream model failure"),
        (status = 500, description = "Persistence failure")
    ),
)]
pub async fn detect_ingredients(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<IngredientsResponse>, ApiError> {
    let mut upload: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_default();

            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;

            if data.len() > MAX_IMAGE_SIZE {
                return Err(ApiError::BadRequest(format!(
                    "Image too large. Max size is {} bytes",
                    MAX_IMAGE_SIZE
                )));
            }

            upload = Some((data.to_vec(), content_type));
        }
    }

    let (image_data, content_type) =
        upload.ok_or_else(|| ApiError::BadRequest("Missing file field".to_string()))?;

    let result = state
        .service
        .detect_ingredients(DetectIngredientsInput {
            image_data,
            content_type,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(IngredientsResponse::from(result)))
}
