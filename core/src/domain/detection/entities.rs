use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_uuid_v7;

/// Fixed provenance label stamped on every substitution record.
pub const DETECTION_SOURCE: &str = "Gemini AI";

/// One recognized food item, as reported by the model. The name keeps the
/// model's casing here; normalization happens at persistence time only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DetectionItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub confidence: f64,
}

/// Top-level detection payload. Always well-formed: a failed parse degrades
/// to an empty ingredient list, never a missing key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct DetectionResult {
    #[serde(default)]
    pub ingredients: Vec<DetectionItem>,
}

/// Durable pantry row, one per detected item. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PantryRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub item_name: String,
    pub date_added: NaiveDate,
}

impl PantryRecord {
    pub fn new(user_id: Uuid, item_name: String, date_added: NaiveDate) -> Self {
        Self {
            id: generate_uuid_v7(),
            user_id,
            item_name,
            date_added,
        }
    }
}

/// Durable substitution row, one per detected item. `alt_name` stays unset in
/// the detection flow; the column exists for substitution suggestions written
/// by other producers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionRecord {
    pub id: Uuid,
    pub ingredient: String,
    pub alt_name: Option<String>,
    pub nutrition_delta: NutritionDelta,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NutritionDelta {
    pub confidence: f64,
}

impl SubstitutionRecord {
    pub fn new(ingredient: String, confidence: f64) -> Self {
        Self {
            id: generate_uuid_v7(),
            ingredient,
            alt_name: None,
            nutrition_delta: NutritionDelta { confidence },
            source: DETECTION_SOURCE.to_string(),
        }
    }
}
