//! ffmpeg faststart rewrite.
//!
//! Remuxes an MP4 so the moov atom sits at the front of the file, letting
//! clients start playback before the download completes. Streams are
//! copied, not re-encoded.

use crate::error::ProcessingError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

const FAST_START_SUFFIX: &str = ".faststart";

/// Seam over the ffmpeg remux step.
#[async_trait]
pub trait FastStartRewriter: Send + Sync {
    /// Rewrite `input` into a new file and return its path. The caller owns
    /// the output file and is responsible for removing it.
    async fn rewrite(&self, input: &Path) -> Result<PathBuf, ProcessingError>;
}

/// `FastStartRewriter` backed by the ffmpeg binary.
pub struct FfmpegRewriter {
    ffmpeg_path: String,
}

impl FfmpegRewriter {
    pub fn new(ffmpeg_path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }
}

/// Output path for a rewrite: the input path with a suffix appended, so the
/// output lands in the same (temporary) directory as the input.
pub fn output_path(input: &Path) -> PathBuf {
    let mut os_string = input.as_os_str().to_os_string();
    os_string.push(FAST_START_SUFFIX);
    os_string.push(".mp4");
    PathBuf::from(os_string)
}

#[async_trait]
impl FastStartRewriter for FfmpegRewriter {
    async fn rewrite(&self, input: &Path) -> Result<PathBuf, ProcessingError> {
        let output = output_path(input);

        let start = std::time::Instant::now();

        let result = Command::new(&self.ffmpeg_path)
            .arg("-i")
            .arg(input)
            .arg("-c")
            .arg("copy")
            .arg("-movflags")
            .arg("faststart")
            .arg("-f")
            .arg("mp4")
            .arg(&output)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(ProcessingError::RewriteExec)?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            tracing::error!(
                input = %input.display(),
                status = ?result.status.code(),
                stderr = %stderr,
                "ffmpeg faststart rewrite failed"
            );
            // ffmpeg may have left a partial output file behind
            let _ = tokio::fs::remove_file(&output).await;
            return Err(ProcessingError::RewriteFailed(stderr));
        }

        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Rewrote video for faststart playback"
        );

        Ok(output)
    }
}
