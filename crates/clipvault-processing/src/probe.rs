//! ffprobe stream inspection.
//!
//! The prober reads the dimensions of the first stream ffprobe reports.
//! Files whose first stream carries no geometry (e.g. an audio stream)
//! fail with `InvalidDimensions` rather than being searched further.

use crate::error::ProcessingError;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Pixel dimensions of a video stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Seam over ffprobe so the ingest pipeline can be tested without media
/// tools installed.
#[async_trait]
pub trait MediaProber: Send + Sync {
    async fn probe_dimensions(&self, path: &Path) -> Result<Dimensions, ProcessingError>;
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    width: Option<u32>,
    height: Option<u32>,
}

/// `MediaProber` backed by the ffprobe binary.
pub struct FfprobeProber {
    ffprobe_path: String,
}

impl FfprobeProber {
    pub fn new(ffprobe_path: impl Into<String>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }
}

/// Parse ffprobe `-show_streams` JSON into the first stream's dimensions.
fn parse_probe_output(stdout: &[u8]) -> Result<Dimensions, ProcessingError> {
    let output: ProbeOutput =
        serde_json::from_slice(stdout).map_err(ProcessingError::ProbeParse)?;

    let first = output.streams.first().ok_or(ProcessingError::NoStreams)?;

    match (first.width, first.height) {
        (Some(width), Some(height)) if width > 0 && height > 0 => {
            Ok(Dimensions { width, height })
        }
        _ => Err(ProcessingError::InvalidDimensions),
    }
}

#[async_trait]
impl MediaProber for FfprobeProber {
    async fn probe_dimensions(&self, path: &Path) -> Result<Dimensions, ProcessingError> {
        let output = Command::new(&self.ffprobe_path)
            .arg("-v")
            .arg("error")
            .arg("-print_format")
            .arg("json")
            .arg("-show_streams")
            .arg(path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(ProcessingError::ProbeExec)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::error!(
                path = %path.display(),
                status = ?output.status.code(),
                stderr = %stderr,
                "ffprobe failed"
            );
            return Err(ProcessingError::ProbeFailed(stderr));
        }

        let dimensions = parse_probe_output(&output.stdout)?;

        tracing::debug!(
            path = %path.display(),
            width = dimensions.width,
            height = dimensions.height,
            "Probed video dimensions"
        );

        Ok(dimensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_stream_dimensions() {
        let json = br#"{"streams":[{"width":1920,"height":1080},{"width":4,"height":4}]}"#;
        let dims = parse_probe_output(json).unwrap();
        assert_eq!(
            dims,
            Dimensions {
                width: 1920,
                height: 1080
            }
        );
    }

    #[test]
    fn test_parse_no_streams() {
        let json = br#"{"streams":[]}"#;
        assert!(matches!(
            parse_probe_output(json),
            Err(ProcessingError::NoStreams)
        ));
        let json_missing = br#"{}"#;
        assert!(matches!(
            parse_probe_output(json_missing),
            Err(ProcessingError::NoStreams)
        ));
    }

    #[test]
    fn test_parse_first_stream_without_geometry() {
        // audio-first file: no width/height on the first stream
        let json = br#"{"streams":[{"codec_type":"audio"},{"width":1920,"height":1080}]}"#;
        assert!(matches!(
            parse_probe_output(json),
            Err(ProcessingError::InvalidDimensions)
        ));
    }

    #[test]
    fn test_parse_zero_dimensions_rejected() {
        let json = br#"{"streams":[{"width":0,"height":1080}]}"#;
        assert!(matches!(
            parse_probe_output(json),
            Err(ProcessingError::InvalidDimensions)
        ));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse_probe_output(b"not json"),
            Err(ProcessingError::ProbeParse(_))
        ));
    }
}
