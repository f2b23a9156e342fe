//! Video upload handler: runs the ingestion pipeline and returns the
//! updated record with a freshly signed URL.

use crate::auth::AuthContext;
use crate::error::HttpAppError;
use crate::handlers::videos::parse_video_id;
use crate::services::{signed_video, VideoIngestService};
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use std::time::Duration;

pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(video_id): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;

    let service = VideoIngestService::new(&state);
    let updated = service.ingest(video_id, auth.user_id, multipart).await?;

    let ttl = Duration::from_secs(state.config.signed_url_ttl_secs);
    let signed = signed_video(state.objects.as_ref(), updated, ttl).await?;

    Ok(Json(signed))
}
