//! Storage abstraction trait
//!
//! Defines the `ObjectStorage` trait the video backends implement. The API
//! crate depends on this trait so integration tests can swap in a fake.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Private object storage for processed videos.
///
/// Uploads land under the backend's configured bucket; the bucket stays
/// private, so the only read path is `presigned_get_url`.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Bucket this backend writes to. Recorded alongside the key in the
    /// stored reference.
    fn bucket(&self) -> &str;

    /// Upload a file from the local filesystem to the given object key.
    async fn upload_file(
        &self,
        key: &str,
        local_path: &std::path::Path,
        content_type: &str,
    ) -> StorageResult<()>;

    /// Delete an object by key.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check whether an object exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Generate a time-limited GET URL for an object in the private bucket.
    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> StorageResult<String>;
}
