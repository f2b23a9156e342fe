//! Video record CRUD handlers.

use crate::auth::AuthContext;
use crate::error::{HttpAppError, ValidatedJson};
use crate::services::{signed_video, signed_videos};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use clipvault_core::models::{CreateVideoRequest, Video};
use clipvault_core::AppError;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use validator::Validate;

/// Parse a path segment as a record id. Malformed ids are a 400, even for
/// unauthenticated callers, so this runs before anything else.
pub fn parse_video_id(raw: &str) -> Result<Uuid, HttpAppError> {
    Uuid::parse_str(raw).map_err(|e| HttpAppError(AppError::from(e)))
}

fn signing_ttl(state: &AppState) -> Duration {
    Duration::from_secs(state.config.signed_url_ttl_secs)
}

/// Fetch a record and verify the caller owns it.
pub async fn load_owned_video(
    state: &AppState,
    video_id: Uuid,
    user_id: Uuid,
) -> Result<Video, HttpAppError> {
    let video = state
        .videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video_id)))?;

    if video.user_id != user_id {
        return Err(AppError::Forbidden("Not the owner of this video".to_string()).into());
    }

    Ok(video)
}

pub async fn create_video(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    ValidatedJson(request): ValidatedJson<CreateVideoRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let video = Video::new(auth.user_id, request.title, request.description);
    let created = state.videos.create_video(&video).await?;

    tracing::info!(video_id = %created.id, user_id = %auth.user_id, "Video record created");

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_videos(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
) -> Result<impl IntoResponse, HttpAppError> {
    let videos = state.videos.list_videos(auth.user_id).await?;
    let signed = signed_videos(state.objects.as_ref(), videos, signing_ttl(&state)).await?;

    Ok(Json(signed))
}

pub async fn get_video(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(video_id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;
    let video = load_owned_video(&state, video_id, auth.user_id).await?;
    let signed = signed_video(state.objects.as_ref(), video, signing_ttl(&state)).await?;

    Ok(Json(signed))
}

pub async fn delete_video(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(video_id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;
    load_owned_video(&state, video_id, auth.user_id).await?;

    state.videos.delete_video(video_id).await?;

    tracing::info!(video_id = %video_id, user_id = %auth.user_id, "Video record deleted");

    Ok(StatusCode::NO_CONTENT)
}
