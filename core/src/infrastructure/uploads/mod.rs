use std::path::PathBuf;

use tokio::fs;
use tracing::error;

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_uuid_v7},
    detection::{ports::UploadStore, value_objects::StoredUpload},
};

/// Spools uploads to a local directory under a fresh uuid-v7 name per
/// request. Files here are transient: the service removes them once the
/// pipeline finishes, whatever the outcome.
#[derive(Debug, Clone)]
pub struct FsUploadStore {
    upload_dir: PathBuf,
}

impl FsUploadStore {
    pub fn new(upload_dir: PathBuf) -> Self {
        Self { upload_dir }
    }
}

impl UploadStore for FsUploadStore {
    async fn save(&self, data: Vec<u8>, content_type: String) -> Result<StoredUpload, CoreError> {
        fs::create_dir_all(&self.upload_dir).await.map_err(|e| {
            error!(
                "Failed to create upload directory {}: {}",
                self.upload_dir.display(),
                e
            );
            CoreError::InternalServerError
        })?;

        let file_name = format!("{}.{}", generate_uuid_v7(), extension_for(&content_type));
        let path = self.upload_dir.join(file_name);

        fs::write(&path, &data).await.map_err(|e| {
            error!("Failed to spool upload to {}: {}", path.display(), e);
            CoreError::InternalServerError
        })?;

        Ok(StoredUpload { path })
    }

    async fn read(&self, path: PathBuf) -> Result<Vec<u8>, CoreError> {
        fs::read(&path).await.map_err(|e| {
            error!("Failed to read spooled upload {}: {}", path.display(), e);
            CoreError::InternalServerError
        })
    }

    async fn remove(&self, path: PathBuf) -> Result<(), CoreError> {
        fs::remove_file(&path).await.map_err(|e| {
            error!("Failed to remove spooled upload {}: {}", path.display(), e);
            CoreError::InternalServerError
        })
    }
}

fn extension_for(content_type: &str) -> String {
    match content_type {
        "image/jpeg" => "jpg".to_string(),
        other => {
            let subtype: String = other
                .split('/')
                .nth(1)
                .unwrap_or_default()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect();
            if subtype.is_empty() {
                "img".to_string()
            } else {
                subtype
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_read_remove_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsUploadStore::new(dir.path().to_path_buf());

        let stored = store
            .save(vec![1, 2, 3], "image/jpeg".to_string())
            .await
            .unwrap();
        assert!(stored.path.exists());
        assert_eq!(stored.path.extension().unwrap(), "jpg");

        let data = store.read(stored.path.clone()).await.unwrap();
        assert_eq!(data, vec![1, 2, 3]);

        store.remove(stored.path.clone()).await.unwrap();
        assert!(!stored.path.exists());
    }

    #[tokio::test]
    async fn test_concurrent_saves_get_distinct_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsUploadStore::new(dir.path().to_path_buf());

        let first = store.save(vec![1], "image/png".to_string()).await.unwrap();
        let second = store.save(vec![2], "image/png".to_string()).await.unwrap();

        assert_ne!(first.path, second.path);
    }

    #[tokio::test]
    async fn test_remove_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsUploadStore::new(dir.path().to_path_buf());

        let missing = dir.path().join("gone.jpg");
        assert!(store.remove(missing).await.is_err());
    }

    #[test]
    fn test_extension_for_content_types() {
        assert_eq!(extension_for("image/jpeg"), "jpg");
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("image/svg+xml"), "svgxml");
        assert_eq!(extension_for("image/"), "img");
    }
}
