//! ClipVault HTTP API.
//!
//! Exposes the video record CRUD routes plus the two media upload routes
//! (thumbnail to local assets, video through the probe/rewrite/S3 pipeline).
//! The library surface exists so integration tests can assemble the router
//! with fake collaborators.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use state::AppState;
