//! Video record model and request types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A video record. `thumbnail_url` and `video_url` start out null and are
/// filled in by the respective upload endpoints. `video_url` holds a
/// `bucket,key` storage reference at rest; it is replaced by a presigned
/// URL before the record leaves the API.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Video {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub description: Option<String>,
    pub user_id: Uuid,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
}

impl Video {
    pub fn new(user_id: Uuid, title: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            title,
            description,
            user_id,
            thumbnail_url: None,
            video_url: None,
        }
    }
}

/// Body of `POST /api/videos`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVideoRequest {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    #[validate(length(max = 4096, message = "description must be at most 4096 characters"))]
    pub description: Option<String>,
}

/// Aspect-ratio classification of an uploaded video. Serialized form is the
/// object key prefix under which the video is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
    Other,
}

impl Orientation {
    /// Classify by width/height ratio. The bands are exclusive: a 16:9
    /// frame lands around 1.777..., a 9:16 frame around 0.5625; anything
    /// outside the two bands is `Other`.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if height == 0 {
            return Orientation::Other;
        }
        let ratio = width as f64 / height as f64;
        if ratio > 1.7 && ratio < 1.8 {
            Orientation::Landscape
        } else if ratio > 0.5 && ratio < 0.6 {
            Orientation::Portrait
        } else {
            Orientation::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
            Orientation::Other => "other",
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
