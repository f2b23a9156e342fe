//! Media processing: ffprobe stream inspection and ffmpeg faststart rewrite.

pub mod error;
pub mod faststart;
pub mod probe;

pub use error::ProcessingError;
pub use faststart::{FastStartRewriter, FfmpegRewriter};
pub use probe::{Dimensions, FfprobeProber, MediaProber};
