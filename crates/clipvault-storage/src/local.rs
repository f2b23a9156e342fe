use crate::traits::{StorageError, StorageResult};
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem store for thumbnail assets.
///
/// Files live directly under `base_path` and are served by the API at
/// `base_url` (a `/assets` route backed by this directory).
#[derive(Clone)]
pub struct LocalAssets {
    base_path: PathBuf,
    base_url: String,
}

impl LocalAssets {
    /// Create a new LocalAssets instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for thumbnail files (e.g., "./assets")
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:8080/assets")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create assets directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalAssets {
            base_path,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_path(&self) -> &std::path::Path {
        &self.base_path
    }

    /// Convert a filename to a filesystem path, rejecting anything that
    /// could escape the assets directory.
    fn filename_to_path(&self, filename: &str) -> StorageResult<PathBuf> {
        if filename.is_empty()
            || filename.contains("..")
            || filename.contains('/')
            || filename.contains('\\')
        {
            return Err(StorageError::InvalidKey(
                "Asset filename contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(filename))
    }

    /// Write a thumbnail file and return its public URL.
    pub async fn save(&self, filename: &str, data: &[u8]) -> StorageResult<String> {
        let path = self.filename_to_path(filename)?;

        let mut file = fs::File::create(&path).await?;
        file.write_all(data).await?;
        file.flush().await?;

        tracing::info!(
            path = %path.display(),
            size_bytes = data.len(),
            "Thumbnail asset saved"
        );

        Ok(self.url_for(filename))
    }

    /// Delete a thumbnail file. Missing files are not an error.
    pub async fn delete(&self, filename: &str) -> StorageResult<()> {
        let path = self.filename_to_path(filename)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(e.to_string())),
        }
    }

    /// Public URL under which a saved asset is served.
    pub fn url_for(&self, filename: &str) -> String {
        format!("{}/{}", self.base_url, filename)
    }
}
