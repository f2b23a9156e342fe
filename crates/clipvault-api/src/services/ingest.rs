//! Video ingestion pipeline.
//!
//! Stages the multipart upload to a temp file, probes it, rewrites it for
//! faststart playback, uploads the result to private object storage, and
//! commits the `bucket,key` reference to the record. Every gate aborts the
//! request before any later side effect; temp files are removed on all
//! exit paths (tempfile Drop for the staged original, explicit remove for
//! the rewrite output).

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::extract::multipart::{Field, Multipart};
use clipvault_core::models::{AssetRef, Orientation, Video};
use clipvault_core::AppError;
use clipvault_storage::keys;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

const VIDEO_FIELD: &str = "video";
const VIDEO_CONTENT_TYPE: &str = "video/mp4";
const VIDEO_EXTENSION: &str = "mp4";

pub struct VideoIngestService<'a> {
    state: &'a AppState,
}

impl<'a> VideoIngestService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Run the full ingestion pipeline for one upload. Returns the updated
    /// record with the stored reference still in place; the handler signs
    /// it before responding.
    pub async fn ingest(
        &self,
        video_id: Uuid,
        user_id: Uuid,
        mut multipart: Multipart,
    ) -> Result<Video, HttpAppError> {
        let state = self.state;

        // Authorize before touching the body or the filesystem.
        let mut video = state
            .videos
            .get_video(video_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video_id)))?;

        if video.user_id != user_id {
            return Err(AppError::Forbidden("Not the owner of this video".to_string()).into());
        }

        let (staged, size_bytes) = loop {
            match multipart.next_field().await? {
                Some(field) if field.name() == Some(VIDEO_FIELD) => {
                    break self.stage(field).await?
                }
                Some(_) => continue,
                None => {
                    return Err(AppError::InvalidInput(format!(
                        "Missing multipart field '{}'",
                        VIDEO_FIELD
                    ))
                    .into())
                }
            }
        };

        let dimensions = state.prober.probe_dimensions(staged.path()).await?;
        let orientation = Orientation::from_dimensions(dimensions.width, dimensions.height);

        let processed = state.rewriter.rewrite(staged.path()).await?;

        let asset_id = keys::random_asset_id();
        let key = keys::video_object_key(orientation.as_str(), &asset_id, VIDEO_EXTENSION);

        let upload_result = state
            .objects
            .upload_file(&key, &processed, VIDEO_CONTENT_TYPE)
            .await;

        // The rewrite output is ours to clean up whether or not the upload
        // succeeded.
        if let Err(e) = tokio::fs::remove_file(&processed).await {
            tracing::warn!(
                path = %processed.display(),
                error = %e,
                "Failed to remove rewritten temp file"
            );
        }

        upload_result?;

        video.video_url = Some(AssetRef::new(state.objects.bucket(), &key).compose());
        let updated = state.videos.update_video(&video).await?;

        tracing::info!(
            video_id = %video_id,
            key = %key,
            orientation = %orientation,
            width = dimensions.width,
            height = dimensions.height,
            size_bytes,
            "Video ingested"
        );

        Ok(updated)
    }

    /// Stream the upload field into a temp file, enforcing the content-type
    /// and byte-cap policy while reading.
    async fn stage(&self, mut field: Field<'_>) -> Result<(NamedTempFile, u64), HttpAppError> {
        let content_type = field
            .content_type()
            .map(|ct| ct.split(';').next().unwrap_or("").trim().to_string())
            .unwrap_or_default();

        if content_type != VIDEO_CONTENT_TYPE {
            return Err(AppError::UnsupportedMediaType(format!(
                "Only {} is accepted",
                VIDEO_CONTENT_TYPE
            ))
            .into());
        }

        let max_bytes = self.state.config.max_video_upload_bytes;

        let staged = tempfile::Builder::new()
            .prefix("clipvault-upload-")
            .suffix(".mp4")
            .tempfile()
            .map_err(AppError::from)?;

        let mut file = tokio::fs::File::from_std(staged.reopen().map_err(AppError::from)?);

        let mut written: u64 = 0;
        while let Some(chunk) = field.chunk().await? {
            written += chunk.len() as u64;
            if written > max_bytes {
                return Err(AppError::PayloadTooLarge(format!(
                    "Upload exceeds the {} byte limit",
                    max_bytes
                ))
                .into());
            }
            file.write_all(&chunk).await.map_err(AppError::from)?;
        }

        if written == 0 {
            return Err(AppError::InvalidInput("Uploaded video is empty".to_string()).into());
        }

        file.flush().await.map_err(AppError::from)?;

        Ok((staged, written))
    }
}
