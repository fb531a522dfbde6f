use chrono::Utc;
use tracing::warn;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    detection::{
        entities::{DetectionItem, DetectionResult, PantryRecord, SubstitutionRecord},
        helpers::normalize_item,
        parser::parse_detection,
        ports::{
            DetectionService, LLMClient, PantryRepository, SnapshotStore, SubstitutionRepository,
            UploadStore,
        },
        prompt::DETECTION_PROMPT,
        schema::get_detection_schema,
        value_objects::{DetectIngredientsInput, StoredUpload},
    },
};

impl<L, P, S, U, SN> DetectionService for Service<L, P, S, U, SN>
where
    L: LLMClient,
    P: PantryRepository,
    S: SubstitutionRepository,
    U: UploadStore,
    SN: SnapshotStore,
{
    async fn detect_ingredients(
        &self,
        input: DetectIngredientsInput,
    ) -> Result<DetectionResult, CoreError> {
        // 1. Reject non-image uploads before anything touches disk or network
        if !input.content_type.starts_with("image/") {
            return Err(CoreError::InvalidInput(
                "Only image files are allowed".to_string(),
            ));
        }

        // 2. Spool the upload; removal is owed on every exit path from here on
        let stored = self
            .upload_store
            .save(input.image_data, input.content_type.clone())
            .await?;

        let outcome = self.run_detection(&stored, &input.content_type).await;

        if let Err(err) = self.upload_store.remove(stored.path.clone()).await {
            warn!(
                "failed to remove spooled upload {}: {}",
                stored.path.display(),
                err
            );
        }

        outcome
    }
}

impl<L, P, S, U, SN> Service<L, P, S, U, SN>
where
    L: LLMClient,
    P: PantryRepository,
    S: SubstitutionRepository,
    U: UploadStore,
    SN: SnapshotStore,
{
    async fn run_detection(
        &self,
        stored: &StoredUpload,
        mime_type: &str,
    ) -> Result<DetectionResult, CoreError> {
        // 3. Call the model with the spooled image and the fixed prompt
        let image_data = self.upload_store.read(stored.path.clone()).await?;

        let raw_reply = self
            .llm_client
            .generate_with_image(
                DETECTION_PROMPT.to_string(),
                image_data,
                mime_type.to_string(),
                get_detection_schema(),
            )
            .await?;

        // 4. Parse leniently: an unusable reply degrades to an empty result
        let result = parse_detection(&raw_reply);

        // 5. Sync to the remote store
        self.sync_detections(&result.ingredients).await?;

        // 6. Overwrite the last-result snapshot, best-effort
        if let Err(err) = self.snapshot_store.save(&result).await {
            warn!("failed to write detection snapshot: {}", err);
        }

        Ok(result)
    }

    /// Writes two records per item, in model output order. Each insert is an
    /// independent remote call; the first failure aborts the sync and leaves
    /// earlier writes committed.
    async fn sync_detections(&self, items: &[DetectionItem]) -> Result<(), CoreError> {
        let today = Utc::now().date_naive();

        for item in items {
            let (name, confidence) = normalize_item(item);

            self.pantry_repository
                .insert(PantryRecord::new(self.detection.user_id, name.clone(), today))
                .await?;

            self.substitution_repository
                .insert(SubstitutionRecord::new(name, confidence))
                .await?;
        }

        tracing::debug!("synced {} detected items", items.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use mockall::Sequence;
    use uuid::Uuid;

    use super::*;
    use crate::domain::{
        common::DetectionConfig,
        detection::ports::{
            MockLLMClient, MockPantryRepository, MockSnapshotStore, MockSubstitutionRepository,
            MockUploadStore,
        },
    };

    const USER_ID: Uuid = Uuid::from_u128(0x42);

    fn test_config() -> DetectionConfig {
        DetectionConfig {
            user_id: USER_ID,
            upload_dir: PathBuf::from("uploads"),
            snapshot_path: PathBuf::from("outputs/detections.json"),
        }
    }

    fn jpeg_input() -> DetectIngredientsInput {
        DetectIngredientsInput {
            image_data: vec![0xFF, 0xD8, 0xFF, 0xE0],
            content_type: "image/jpeg".to_string(),
        }
    }

    fn spooled() -> StoredUpload {
        StoredUpload {
            path: PathBuf::from("uploads/test.jpg"),
        }
    }

    #[tokio::test]
    async fn test_non_image_upload_rejected_before_any_side_effect() {
        let llm = MockLLMClient::new();
        let pantry = MockPantryRepository::new();
        let substitutions = MockSubstitutionRepository::new();
        let mut uploads = MockUploadStore::new();
        uploads.expect_save().never();
        let snapshot = MockSnapshotStore::new();

        let service = Service::new(llm, pantry, substitutions, uploads, snapshot, test_config());

        let err = service
            .detect_ingredients(DetectIngredientsInput {
                image_data: b"not an image".to_vec(),
                content_type: "text/plain".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_two_inserts_per_item_normalized_and_in_order() {
        let mut seq = Sequence::new();

        let mut uploads = MockUploadStore::new();
        uploads
            .expect_save()
            .withf(|data, content_type| !data.is_empty() && content_type == "image/jpeg")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Box::pin(async move { Ok(spooled()) }));
        uploads
            .expect_read()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Box::pin(async move { Ok(vec![0xFF, 0xD8, 0xFF, 0xE0]) }));

        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image()
            .withf(|prompt, data, mime_type, _| {
                prompt.contains("Return strictly JSON")
                    && !data.is_empty()
                    && mime_type == "image/jpeg"
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _, _| {
                Box::pin(async move {
                    Ok("```json\n{\"ingredients\":[{\"name\":\"Milk\",\"confidence\":0.93},{\"name\":\"Brown Rice\",\"confidence\":0.756}]}\n```".to_string())
                })
            });

        let today = Utc::now().date_naive();

        let mut pantry = MockPantryRepository::new();
        let mut substitutions = MockSubstitutionRepository::new();

        pantry
            .expect_insert()
            .withf(move |record| {
                record.item_name == "milk"
                    && record.user_id == USER_ID
                    && record.date_added == today
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|r| Box::pin(async move { Ok(r) }));
        substitutions
            .expect_insert()
            .withf(|record| {
                record.ingredient == "milk"
                    && record.alt_name.is_none()
                    && record.nutrition_delta.confidence == 0.93
                    && record.source == "Gemini AI"
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|r| Box::pin(async move { Ok(r) }));
        pantry
            .expect_insert()
            .withf(|record| record.item_name == "brown rice")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|r| Box::pin(async move { Ok(r) }));
        substitutions
            .expect_insert()
            .withf(|record| {
                record.ingredient == "brown rice" && record.nutrition_delta.confidence == 0.76
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|r| Box::pin(async move { Ok(r) }));

        let mut snapshot = MockSnapshotStore::new();
        snapshot
            .expect_save()
            .withf(|result| result.ingredients.len() == 2 && result.ingredients[0].name == "Milk")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Box::pin(async move { Ok(()) }));

        uploads
            .expect_remove()
            .with(mockall::predicate::eq(spooled().path))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Box::pin(async move { Ok(()) }));

        let service = Service::new(llm, pantry, substitutions, uploads, snapshot, test_config());

        let result = service.detect_ingredients(jpeg_input()).await.unwrap();

        // The response keeps the model's casing and precision
        assert_eq!(result.ingredients[0].name, "Milk");
        assert_eq!(result.ingredients[0].confidence, 0.93);
        assert_eq!(result.ingredients[1].name, "Brown Rice");
        assert_eq!(result.ingredients[1].confidence, 0.756);
    }

    #[tokio::test]
    async fn test_sync_aborts_on_first_insert_failure() {
        let mut seq = Sequence::new();

        let mut uploads = MockUploadStore::new();
        uploads
            .expect_save()
            .times(1)
            .returning(|_, _| Box::pin(async move { Ok(spooled()) }));
        uploads.expect_read().times(1).returning(|_| Box::pin(async move { Ok(vec![1]) }));

        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image().times(1).returning(|_, _, _, _| {
            Box::pin(async move {
                Ok(r#"{"ingredients":[{"name":"apple","confidence":0.9},{"name":"banana","confidence":0.8},{"name":"cherry","confidence":0.7}]}"#.to_string())
            })
        });

        let mut pantry = MockPantryRepository::new();
        let mut substitutions = MockSubstitutionRepository::new();

        pantry
            .expect_insert()
            .withf(|record| record.item_name == "apple")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|r| Box::pin(async move { Ok(r) }));
        substitutions
            .expect_insert()
            .withf(|record| record.ingredient == "apple")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|r| Box::pin(async move { Ok(r) }));
        pantry
            .expect_insert()
            .withf(|record| record.item_name == "banana")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|r| Box::pin(async move { Ok(r) }));
        // The third item never reaches the store: no expectation for "cherry"
        substitutions
            .expect_insert()
            .withf(|record| record.ingredient == "banana")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Box::pin(async move {
                    Err(CoreError::PersistenceError(
                        "connection reset by peer".to_string(),
                    ))
                })
            });

        let snapshot = MockSnapshotStore::new();

        uploads.expect_remove().times(1).returning(|_| Box::pin(async move { Ok(()) }));

        let service = Service::new(llm, pantry, substitutions, uploads, snapshot, test_config());

        let err = service.detect_ingredients(jpeg_input()).await.unwrap_err();

        assert_eq!(
            err,
            CoreError::PersistenceError("connection reset by peer".to_string())
        );
    }

    #[tokio::test]
    async fn test_prose_reply_degrades_to_empty_with_zero_writes() {
        let mut uploads = MockUploadStore::new();
        uploads
            .expect_save()
            .times(1)
            .returning(|_, _| Box::pin(async move { Ok(spooled()) }));
        uploads.expect_read().times(1).returning(|_| Box::pin(async move { Ok(vec![1]) }));
        uploads.expect_remove().times(1).returning(|_| Box::pin(async move { Ok(()) }));

        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image()
            .times(1)
            .returning(|_, _, _, _| {
                Box::pin(async move { Ok("I see a fridge but cannot list items.".to_string()) })
            });

        let pantry = MockPantryRepository::new();
        let substitutions = MockSubstitutionRepository::new();

        let mut snapshot = MockSnapshotStore::new();
        snapshot
            .expect_save()
            .withf(|result| result.ingredients.is_empty())
            .times(1)
            .returning(|_| Box::pin(async move { Ok(()) }));

        let service = Service::new(llm, pantry, substitutions, uploads, snapshot, test_config());

        let result = service.detect_ingredients(jpeg_input()).await.unwrap();
        assert_eq!(result, DetectionResult::default());
    }

    #[tokio::test]
    async fn test_upstream_error_propagates_and_spool_is_removed() {
        let mut uploads = MockUploadStore::new();
        uploads
            .expect_save()
            .times(1)
            .returning(|_, _| Box::pin(async move { Ok(spooled()) }));
        uploads.expect_read().times(1).returning(|_| Box::pin(async move { Ok(vec![1]) }));
        uploads.expect_remove().times(1).returning(|_| Box::pin(async move { Ok(()) }));

        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image()
            .times(1)
            .returning(|_, _, _, _| {
                Box::pin(async move { Err(CoreError::UpstreamError("quota exceeded".to_string())) })
            });

        let pantry = MockPantryRepository::new();
        let substitutions = MockSubstitutionRepository::new();
        let snapshot = MockSnapshotStore::new();

        let service = Service::new(llm, pantry, substitutions, uploads, snapshot, test_config());

        let err = service.detect_ingredients(jpeg_input()).await.unwrap_err();
        assert_eq!(err, CoreError::UpstreamError("quota exceeded".to_string()));
    }

    #[tokio::test]
    async fn test_snapshot_failure_does_not_fail_the_request() {
        let mut uploads = MockUploadStore::new();
        uploads
            .expect_save()
            .times(1)
            .returning(|_, _| Box::pin(async move { Ok(spooled()) }));
        uploads.expect_read().times(1).returning(|_| Box::pin(async move { Ok(vec![1]) }));
        uploads.expect_remove().times(1).returning(|_| Box::pin(async move { Ok(()) }));

        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image()
            .times(1)
            .returning(|_, _, _, _| {
                Ok(r#"{"ingredients":[{"name":"tofu","confidence":0.81}]}"#.to_string())
            });

        let mut pantry = MockPantryRepository::new();
        pantry
            .expect_insert()
            .times(1)
            .returning(|r| Box::pin(async move { Ok(r) }));
        let mut substitutions = MockSubstitutionRepository::new();
        substitutions
            .expect_insert()
            .times(1)
            .returning(|r| Box::pin(async move { Ok(r) }));

        let mut snapshot = MockSnapshotStore::new();
        snapshot
            .expect_save()
            .times(1)
            .returning(|_| Box::pin(async move { Err(CoreError::InternalServerError) }));

        let service = Service::new(llm, pantry, substitutions, uploads, snapshot, test_config());

        let result = service.detect_ingredients(jpeg_input()).await.unwrap();
        assert_eq!(result.ingredients.len(), 1);
    }
}
