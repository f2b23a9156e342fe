//! Test helpers: build the router with fake collaborators.
//!
//! Run from workspace root: `cargo test -p clipvault-api`. No Postgres,
//! ffmpeg, or S3 required; the record store, media tools, and object
//! storage are all in-memory fakes behind the same traits the real
//! backends implement.

use async_trait::async_trait;
use axum_test::TestServer;
use clipvault_api::auth::issue_token;
use clipvault_api::setup::routes::setup_routes;
use clipvault_api::state::AppState;
use clipvault_core::models::Video;
use clipvault_core::{AppError, Config};
use clipvault_db::VideoStore;
use clipvault_processing::{Dimensions, FastStartRewriter, MediaProber, ProcessingError};
use clipvault_storage::{LocalAssets, ObjectStorage, StorageError, StorageResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const TEST_BUCKET: &str = "clipvault-test-bucket";

/// In-memory `VideoStore` with call counting.
#[derive(Default)]
pub struct FakeVideoStore {
    pub records: Mutex<HashMap<Uuid, Video>>,
    pub update_calls: AtomicUsize,
}

impl FakeVideoStore {
    pub fn insert(&self, video: Video) {
        self.records.lock().unwrap().insert(video.id, video);
    }

    pub fn get(&self, id: Uuid) -> Option<Video> {
        self.records.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl VideoStore for FakeVideoStore {
    async fn create_video(&self, video: &Video) -> Result<Video, AppError> {
        self.insert(video.clone());
        Ok(video.clone())
    }

    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.get(id))
    }

    async fn list_videos(&self, user_id: Uuid) -> Result<Vec<Video>, AppError> {
        let records = self.records.lock().unwrap();
        let mut videos: Vec<Video> = records
            .values()
            .filter(|v| v.user_id == user_id)
            .cloned()
            .collect();
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(videos)
    }

    async fn update_video(&self, video: &Video) -> Result<Video, AppError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.lock().unwrap();
        if !records.contains_key(&video.id) {
            return Err(AppError::NotFound(format!("Video {} not found", video.id)));
        }
        records.insert(video.id, video.clone());
        Ok(video.clone())
    }

    async fn delete_video(&self, id: Uuid) -> Result<(), AppError> {
        self.records
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))
    }
}

/// In-memory `ObjectStorage`: records uploads, signs deterministically.
#[derive(Default)]
pub struct FakeObjectStorage {
    pub uploads: Mutex<Vec<(String, u64)>>,
    pub presign_calls: AtomicUsize,
    pub fail_signing: AtomicBool,
}

impl FakeObjectStorage {
    pub fn uploaded_keys(&self) -> Vec<String> {
        self.uploads
            .lock()
            .unwrap()
            .iter()
            .map(|(k, _)| k.clone())
            .collect()
    }
}

#[async_trait]
impl ObjectStorage for FakeObjectStorage {
    fn bucket(&self) -> &str {
        TEST_BUCKET
    }

    async fn upload_file(
        &self,
        key: &str,
        local_path: &Path,
        _content_type: &str,
    ) -> StorageResult<()> {
        let data = tokio::fs::read(local_path).await?;
        self.uploads
            .lock()
            .unwrap()
            .push((key.to_string(), data.len() as u64));
        Ok(())
    }

    async fn delete(&self, _key: &str) -> StorageResult<()> {
        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.uploaded_keys().iter().any(|k| k == key))
    }

    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        if self.fail_signing.load(Ordering::SeqCst) {
            return Err(StorageError::SigningFailed("credentials expired".to_string()));
        }
        self.presign_calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!(
            "https://signed.test/{}?expires={}",
            key,
            expires_in.as_secs()
        ))
    }
}

/// `MediaProber` returning fixed dimensions (or a fixed failure).
pub struct FakeProber {
    pub dimensions: Option<Dimensions>,
    pub calls: AtomicUsize,
}

impl FakeProber {
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            dimensions: Some(Dimensions { width, height }),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            dimensions: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl MediaProber for FakeProber {
    async fn probe_dimensions(&self, _path: &Path) -> Result<Dimensions, ProcessingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.dimensions.ok_or(ProcessingError::NoStreams)
    }
}

/// `FastStartRewriter` that copies the input and remembers the output path
/// so tests can assert it was cleaned up.
#[derive(Default)]
pub struct FakeRewriter {
    pub calls: AtomicUsize,
    pub outputs: Mutex<Vec<PathBuf>>,
}

#[async_trait]
impl FastStartRewriter for FakeRewriter {
    async fn rewrite(&self, input: &Path) -> Result<PathBuf, ProcessingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let output = clipvault_processing::faststart::output_path(input);
        tokio::fs::copy(input, &output)
            .await
            .map_err(ProcessingError::RewriteExec)?;
        self.outputs.lock().unwrap().push(output.clone());
        Ok(output)
    }
}

/// Test application: server plus handles on every fake.
pub struct TestApp {
    pub server: TestServer,
    pub videos: Arc<FakeVideoStore>,
    pub objects: Arc<FakeObjectStorage>,
    pub prober: Arc<FakeProber>,
    pub rewriter: Arc<FakeRewriter>,
    pub assets_dir: TempDir,
}

impl TestApp {
    pub fn token_for(&self, user_id: Uuid) -> String {
        issue_token(TEST_JWT_SECRET, user_id, 1).expect("Failed to issue test token")
    }

    /// Seed a record owned by `user_id` and return it.
    pub fn seed_video(&self, user_id: Uuid) -> Video {
        let video = Video::new(user_id, "Seeded video".to_string(), None);
        self.videos.insert(video.clone());
        video
    }
}

fn test_config() -> Config {
    Config {
        server_port: 0,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        database_url: "postgresql://unused/test".to_string(),
        db_max_connections: 1,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_expiry_hours: 1,
        s3_bucket: TEST_BUCKET.to_string(),
        s3_region: "us-east-1".to_string(),
        s3_endpoint: None,
        assets_root: "unused".to_string(),
        public_base_url: "http://localhost:8080".to_string(),
        max_video_upload_bytes: 64 * 1024,
        max_thumbnail_upload_bytes: 16 * 1024,
        ffmpeg_path: "ffmpeg".to_string(),
        ffprobe_path: "ffprobe".to_string(),
        signed_url_ttl_secs: 180,
    }
}

/// Build the app with a prober reporting the given dimensions.
pub async fn setup_test_app_with_prober(prober: FakeProber) -> TestApp {
    let config = test_config();

    let assets_dir = tempfile::tempdir().expect("Failed to create temp assets directory");
    let assets = LocalAssets::new(
        assets_dir.path(),
        "http://localhost:8080/assets".to_string(),
    )
    .await
    .expect("Failed to create local assets");

    let videos = Arc::new(FakeVideoStore::default());
    let objects = Arc::new(FakeObjectStorage::default());
    let prober = Arc::new(prober);
    let rewriter = Arc::new(FakeRewriter::default());

    let state = Arc::new(AppState {
        config: Arc::new(config.clone()),
        videos: videos.clone(),
        objects: objects.clone(),
        prober: prober.clone(),
        rewriter: rewriter.clone(),
        assets,
    });

    let router = setup_routes(&config, state).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        videos,
        objects,
        prober,
        rewriter,
        assets_dir,
    }
}

/// Build the app with a 16:9 prober, the common case.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_prober(FakeProber::with_dimensions(1920, 1080)).await
}
