//! Composite storage reference stored in `videos.video_url`.

use crate::error::AppError;

const SEPARATOR: char = ',';

/// A `bucket,key` pair identifying an object in private storage.
///
/// The comma-joined form is what gets persisted; `parse` is strict so that
/// a corrupt column value surfaces as an error instead of a broken URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    pub bucket: String,
    pub key: String,
}

impl AssetRef {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Serialize to the stored `bucket,key` form.
    pub fn compose(&self) -> String {
        format!("{}{}{}", self.bucket, SEPARATOR, self.key)
    }

    /// Parse a stored reference. Requires exactly one separator and two
    /// non-empty parts.
    pub fn parse(value: &str) -> Result<Self, AppError> {
        let mut parts = value.splitn(3, SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(bucket), Some(key), None) if !bucket.is_empty() && !key.is_empty() => {
                Ok(Self::new(bucket, key))
            }
            _ => Err(AppError::MalformedReference(value.to_string())),
        }
    }
}

impl std::fmt::Display for AssetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.bucket, SEPARATOR, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_parse_round_trip() {
        let reference = AssetRef::new("clipvault-videos", "landscape/abc123.mp4");
        let stored = reference.compose();
        assert_eq!(stored, "clipvault-videos,landscape/abc123.mp4");
        assert_eq!(AssetRef::parse(&stored).unwrap(), reference);
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        assert!(AssetRef::parse("just-a-bucket").is_err());
        assert!(AssetRef::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_extra_separator() {
        assert!(AssetRef::parse("bucket,key,extra").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_parts() {
        assert!(AssetRef::parse(",key").is_err());
        assert!(AssetRef::parse("bucket,").is_err());
        assert!(AssetRef::parse(",").is_err());
    }
}
