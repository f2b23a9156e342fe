//! Thumbnail upload handler.
//!
//! Thumbnails are small public images, so they skip the object-storage
//! pipeline entirely: the bytes land in the local assets directory and the
//! record points at the served `/assets/{file}` URL.

use crate::auth::AuthContext;
use crate::error::HttpAppError;
use crate::handlers::videos::{load_owned_video, parse_video_id};
use crate::services::signed_video;
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    response::IntoResponse,
    Json,
};
use clipvault_core::AppError;
use clipvault_storage::keys;
use std::sync::Arc;
use std::time::Duration;

const THUMBNAIL_FIELD: &str = "thumbnail";
const ALLOWED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png"];

pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(video_id): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;
    let mut video = load_owned_video(&state, video_id, auth.user_id).await?;

    let (content_type, data) = loop {
        match multipart.next_field().await? {
            Some(field) if field.name() == Some(THUMBNAIL_FIELD) => {
                break read_thumbnail_field(&state, field).await?
            }
            Some(_) => continue,
            None => {
                return Err(AppError::InvalidInput(format!(
                    "Missing multipart field '{}'",
                    THUMBNAIL_FIELD
                ))
                .into())
            }
        }
    };

    let extension = extension_for(&content_type)?;
    let filename = keys::thumbnail_filename(&keys::random_asset_id(), extension);
    let url = state.assets.save(&filename, &data).await?;

    video.thumbnail_url = Some(url);
    let updated = state.videos.update_video(&video).await?;

    tracing::info!(
        video_id = %video_id,
        filename = %filename,
        size_bytes = data.len(),
        "Thumbnail uploaded"
    );

    let ttl = Duration::from_secs(state.config.signed_url_ttl_secs);
    let signed = signed_video(state.objects.as_ref(), updated, ttl).await?;

    Ok(Json(signed))
}

async fn read_thumbnail_field(
    state: &AppState,
    mut field: axum::extract::multipart::Field<'_>,
) -> Result<(String, Vec<u8>), HttpAppError> {
    let content_type = field
        .content_type()
        .map(|ct| ct.split(';').next().unwrap_or("").trim().to_string())
        .unwrap_or_default();

    if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
        return Err(AppError::UnsupportedMediaType(
            "Only image/jpeg and image/png thumbnails are accepted".to_string(),
        )
        .into());
    }

    let max_bytes = state.config.max_thumbnail_upload_bytes;
    let mut data = Vec::new();
    while let Some(chunk) = field.chunk().await? {
        if (data.len() + chunk.len()) as u64 > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "Thumbnail exceeds the {} byte limit",
                max_bytes
            ))
            .into());
        }
        data.extend_from_slice(&chunk);
    }

    if data.is_empty() {
        return Err(AppError::InvalidInput("Uploaded thumbnail is empty".to_string()).into());
    }

    Ok((content_type, data))
}

/// File extension for an allow-listed MIME type.
fn extension_for(content_type: &str) -> Result<&'static str, HttpAppError> {
    match content_type {
        "image/jpeg" => Ok("jpg"),
        "image/png" => Ok("png"),
        other => {
            // unreachable for allow-listed types; fall back to the MIME map
            mime_guess::get_mime_extensions_str(other)
                .and_then(|exts| exts.first().copied())
                .ok_or_else(|| {
                    HttpAppError(AppError::UnsupportedMediaType(format!(
                        "No known file extension for {}",
                        other
                    )))
                })
        }
    }
}
