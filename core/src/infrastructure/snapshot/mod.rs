use std::path::PathBuf;

use tokio::fs;
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    detection::{entities::DetectionResult, ports::SnapshotStore},
};

/// Keeps the latest DetectionResult in a single JSON file. Not an audit log:
/// every successful detection overwrites the previous one.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SnapshotStore for FileSnapshotStore {
    async fn save(&self, result: &DetectionResult) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                error!(
                    "Failed to create snapshot directory {}: {}",
                    parent.display(),
                    e
                );
                CoreError::InternalServerError
            })?;
        }

        let json = serde_json::to_vec_pretty(result).map_err(|e| {
            error!("Failed to serialize detection snapshot: {}", e);
            CoreError::InternalServerError
        })?;

        fs::write(&self.path, json).await.map_err(|e| {
            error!(
                "Failed to write detection snapshot {}: {}",
                self.path.display(),
                e
            );
            CoreError::InternalServerError
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::detection::entities::DetectionItem;

    fn result_with(name: &str) -> DetectionResult {
        DetectionResult {
            ingredients: vec![DetectionItem {
                name: name.to_string(),
                confidence: 0.5,
            }],
        }
    }

    #[tokio::test]
    async fn test_save_writes_json_and_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outputs").join("detections.json");
        let store = FileSnapshotStore::new(path.clone());

        store.save(&result_with("milk")).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let decoded: DetectionResult = serde_json::from_str(&written).unwrap();
        assert_eq!(decoded.ingredients[0].name, "milk");
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("detections.json");
        let store = FileSnapshotStore::new(path.clone());

        store.save(&result_with("milk")).await.unwrap();
        store.save(&result_with("eggs")).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let decoded: DetectionResult = serde_json::from_str(&written).unwrap();
        assert_eq!(decoded.ingredients.len(), 1);
        assert_eq!(decoded.ingredients[0].name, "eggs");
    }
}
