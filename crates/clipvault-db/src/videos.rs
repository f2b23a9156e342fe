//! Video record repository.

use async_trait::async_trait;
use chrono::Utc;
use clipvault_core::models::Video;
use clipvault_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Storage seam for video records. Handlers and services depend on this
/// trait so tests can substitute an in-memory store.
#[async_trait]
pub trait VideoStore: Send + Sync {
    async fn create_video(&self, video: &Video) -> Result<Video, AppError>;
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError>;
    async fn list_videos(&self, user_id: Uuid) -> Result<Vec<Video>, AppError>;
    /// Persist the current state of `video`, bumping `updated_at`.
    async fn update_video(&self, video: &Video) -> Result<Video, AppError>;
    async fn delete_video(&self, id: Uuid) -> Result<(), AppError>;
}

/// Postgres-backed `VideoStore`.
#[derive(Clone)]
pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoStore for VideoRepository {
    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "insert", db.record_id = %video.id))]
    async fn create_video(&self, video: &Video) -> Result<Video, AppError> {
        let row = sqlx::query_as::<Postgres, Video>(
            r#"
            INSERT INTO videos (id, created_at, updated_at, title, description, user_id, thumbnail_url, video_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, created_at, updated_at, title, description, user_id, thumbnail_url, video_url
            "#,
        )
        .bind(video.id)
        .bind(video.created_at)
        .bind(video.updated_at)
        .bind(&video.title)
        .bind(&video.description)
        .bind(video.user_id)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let row = sqlx::query_as::<Postgres, Video>(
            r#"
            SELECT id, created_at, updated_at, title, description, user_id, thumbnail_url, video_url
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select"))]
    async fn list_videos(&self, user_id: Uuid) -> Result<Vec<Video>, AppError> {
        let rows = sqlx::query_as::<Postgres, Video>(
            r#"
            SELECT id, created_at, updated_at, title, description, user_id, thumbnail_url, video_url
            FROM videos
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "update", db.record_id = %video.id))]
    async fn update_video(&self, video: &Video) -> Result<Video, AppError> {
        let row = sqlx::query_as::<Postgres, Video>(
            r#"
            UPDATE videos
            SET updated_at = $2,
                title = $3,
                description = $4,
                thumbnail_url = $5,
                video_url = $6
            WHERE id = $1
            RETURNING id, created_at, updated_at, title, description, user_id, thumbnail_url, video_url
            "#,
        )
        .bind(video.id)
        .bind(Utc::now())
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video.id)))?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "delete", db.record_id = %id))]
    async fn delete_video(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Video {} not found", id)));
        }

        Ok(())
    }
}
