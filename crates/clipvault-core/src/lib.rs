//! Core types shared across the ClipVault workspace: configuration,
//! the unified error taxonomy, and domain models.

pub mod config;
pub mod error;
pub mod models;

pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{AssetRef, CreateVideoRequest, Orientation, Video};
