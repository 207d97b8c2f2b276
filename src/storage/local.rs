use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::{Storage, StorageError, StorageResult};

/// Local filesystem storage.
///
/// Files live under `base_path` and are served by the public files route, so
/// "signed" URLs are plain public URLs; expiry is advisory for this backend.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert a storage key to a filesystem path, rejecting traversal.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        if storage_key.is_empty() || storage_key.contains("..") || storage_key.starts_with('/') {
            return Err(StorageError::InvalidKey(storage_key.to_string()));
        }
        Ok(self.base_path.join(storage_key))
    }

    fn url_for(&self, storage_key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), storage_key)
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(&self, storage_key: &str, data: Vec<u8>) -> StorageResult<String> {
        let path = self.key_to_path(storage_key)?;
        self.ensure_parent_dir(&path).await?;

        let mut file = fs::File::create(&path)
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        file.write_all(&data)
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        Ok(self.url_for(storage_key))
    }

    async fn remove(&self, storage_keys: &[String]) -> StorageResult<()> {
        for key in storage_keys {
            let path = self.key_to_path(key)?;
            match fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(StorageError::DeleteFailed(e.to_string())),
            }
        }
        Ok(())
    }

    async fn create_signed_url(
        &self,
        storage_key: &str,
        _expires_in: Duration,
    ) -> StorageResult<String> {
        self.key_to_path(storage_key)?;
        Ok(self.url_for(storage_key))
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(storage_key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let dir = self.key_to_path(prefix)?;
        let mut keys = Vec::new();
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(keys),
            Err(e) => return Err(StorageError::BackendError(e.to_string())),
        };
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?
        {
            if entry.file_type().await.map(|t| t.is_file()).unwrap_or(false) {
                keys.push(format!(
                    "{}/{}",
                    prefix.trim_end_matches('/'),
                    entry.file_name().to_string_lossy()
                ));
            }
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_traversal_keys() {
        let dir = std::env::temp_dir().join(format!("ojt-storage-{}", uuid::Uuid::new_v4()));
        let storage = LocalStorage::new(&dir, "http://localhost:8000/files".to_string())
            .await
            .expect("storage init");

        let err = storage.upload("../escape.txt", b"data".to_vec()).await;
        assert!(matches!(err, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn upload_exists_remove_roundtrip() {
        let dir = std::env::temp_dir().join(format!("ojt-storage-{}", uuid::Uuid::new_v4()));
        let storage = LocalStorage::new(&dir, "http://localhost:8000/files".to_string())
            .await
            .expect("storage init");

        let url = storage
            .upload("documents/e1/resume.pdf", b"pdf".to_vec())
            .await
            .expect("upload");
        assert_eq!(url, "http://localhost:8000/files/documents/e1/resume.pdf");
        assert!(storage.exists("documents/e1/resume.pdf").await.unwrap());

        storage
            .remove(&["documents/e1/resume.pdf".to_string()])
            .await
            .expect("remove");
        assert!(!storage.exists("documents/e1/resume.pdf").await.unwrap());

        // removing again is not an error
        storage
            .remove(&["documents/e1/resume.pdf".to_string()])
            .await
            .expect("idempotent remove");
    }
}
