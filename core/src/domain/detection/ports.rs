use std::future::Future;
use std::path::PathBuf;

use crate::domain::{
    common::entities::app_errors::CoreError,
    detection::{
        entities::{DetectionResult, PantryRecord, SubstitutionRecord},
        value_objects::{DetectIngredientsInput, StoredUpload},
    },
};

/// LLM client trait for calling the vision model
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate_with_image(
        &self,
        prompt: String,
        image_data: Vec<u8>,
        mime_type: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Repository trait for the append-only pantry table
#[cfg_attr(test, mockall::automock)]
pub trait PantryRepository: Send + Sync {
    fn insert(
        &self,
        record: PantryRecord,
    ) -> impl Future<Output = Result<PantryRecord, CoreError>> + Send;
}

/// Repository trait for the append-only substitutions table
#[cfg_attr(test, mockall::automock)]
pub trait SubstitutionRepository: Send + Sync {
    fn insert(
        &self,
        record: SubstitutionRecord,
    ) -> impl Future<Output = Result<SubstitutionRecord, CoreError>> + Send;
}

/// Transient spool for uploaded image bytes
#[cfg_attr(test, mockall::automock)]
pub trait UploadStore: Send + Sync {
    fn save(
        &self,
        data: Vec<u8>,
        content_type: String,
    ) -> impl Future<Output = Result<StoredUpload, CoreError>> + Send;

    fn read(&self, path: PathBuf) -> impl Future<Output = Result<Vec<u8>, CoreError>> + Send;

    fn remove(&self, path: PathBuf) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Last-result cache: a single local JSON file overwritten per detection
#[cfg_attr(test, mockall::automock)]
pub trait SnapshotStore: Send + Sync {
    fn save(
        &self,
        result: &DetectionResult,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Service trait for the detection pipeline
#[cfg_attr(test, mockall::automock)]
pub trait DetectionService: Send + Sync {
    fn detect_ingredients(
        &self,
        input: DetectIngredientsInput,
    ) -> impl Future<Output = Result<DetectionResult, CoreError>> + Send;
}
