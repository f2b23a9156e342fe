use thiserror::Error;

/// Errors from the external media tools.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Failed to run ffprobe: {0}")]
    ProbeExec(#[source] std::io::Error),

    #[error("ffprobe exited with an error: {0}")]
    ProbeFailed(String),

    #[error("Failed to parse ffprobe output: {0}")]
    ProbeParse(#[source] serde_json::Error),

    #[error("ffprobe reported no streams")]
    NoStreams,

    #[error("First stream has no usable dimensions")]
    InvalidDimensions,

    #[error("Failed to run ffmpeg: {0}")]
    RewriteExec(#[source] std::io::Error),

    #[error("ffmpeg exited with an error: {0}")]
    RewriteFailed(String),
}
