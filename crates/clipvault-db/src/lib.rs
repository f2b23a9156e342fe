//! Persistence layer: the video record store and its Postgres implementation.

pub mod videos;

pub use videos::{VideoRepository, VideoStore};
