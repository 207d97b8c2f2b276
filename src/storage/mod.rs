//! Object storage abstraction for submitted files.
//!
//! Storage keys are relative paths such as `documents/{enrollment}/{file}`.
//! Keys must not contain `..` or a leading `/`.

mod local;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub use local::LocalStorage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Backend-agnostic storage surface used by the submission paths.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store a file under the given key, returning its public URL.
    async fn upload(&self, storage_key: &str, data: Vec<u8>) -> StorageResult<String>;

    /// Remove the given keys. Missing keys are not an error.
    async fn remove(&self, storage_keys: &[String]) -> StorageResult<()>;

    /// Issue a time-bounded URL for direct access to an existing object.
    async fn create_signed_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Check whether an object exists.
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// List keys under a prefix.
    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>>;
}
