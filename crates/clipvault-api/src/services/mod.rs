pub mod ingest;
pub mod signing;

pub use ingest::VideoIngestService;
pub use signing::{signed_video, signed_videos};
