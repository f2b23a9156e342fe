//! Application assembly: database, storage backends, routes, server.

pub mod database;
pub mod routes;
pub mod server;

use crate::state::AppState;
use axum::Router;
use clipvault_core::Config;
use clipvault_db::VideoRepository;
use clipvault_processing::{FfmpegRewriter, FfprobeProber};
use clipvault_storage::{LocalAssets, S3Storage};
use std::sync::Arc;

/// Build every collaborator from configuration and assemble the router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router), anyhow::Error> {
    let pool = database::setup_database(&config).await?;

    let videos = Arc::new(VideoRepository::new(pool));
    let objects = Arc::new(S3Storage::new(
        config.s3_bucket.clone(),
        config.s3_region.clone(),
        config.s3_endpoint.clone(),
    )?);
    let prober = Arc::new(FfprobeProber::new(config.ffprobe_path.clone()));
    let rewriter = Arc::new(FfmpegRewriter::new(config.ffmpeg_path.clone()));
    let assets = LocalAssets::new(config.assets_root.clone(), config.assets_base_url()).await?;

    let state = Arc::new(AppState {
        config: Arc::new(config.clone()),
        videos,
        objects,
        prober,
        rewriter,
        assets,
    });

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
