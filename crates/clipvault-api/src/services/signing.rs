//! Read-path URL signing.
//!
//! Stored records carry a `bucket,key` reference in `video_url`. Before a
//! record leaves the API the reference is swapped for a short-lived
//! presigned URL. Only the returned copy is touched; the persisted row
//! keeps the reference.

use crate::error::HttpAppError;
use clipvault_core::models::{AssetRef, Video};
use clipvault_storage::ObjectStorage;
use std::time::Duration;

/// Replace the stored video reference with a presigned GET URL. Records
/// without a video are returned unchanged. Signing failures propagate.
pub async fn signed_video(
    objects: &dyn ObjectStorage,
    mut video: Video,
    ttl: Duration,
) -> Result<Video, HttpAppError> {
    let Some(reference) = video.video_url.as_deref() else {
        return Ok(video);
    };

    let asset = AssetRef::parse(reference)?;
    let url = objects.presigned_get_url(&asset.key, ttl).await?;
    video.video_url = Some(url);

    Ok(video)
}

/// Sign a batch of records for list responses.
pub async fn signed_videos(
    objects: &dyn ObjectStorage,
    videos: Vec<Video>,
    ttl: Duration,
) -> Result<Vec<Video>, HttpAppError> {
    let mut signed = Vec::with_capacity(videos.len());
    for video in videos {
        signed.push(signed_video(objects, video, ttl).await?);
    }
    Ok(signed)
}
