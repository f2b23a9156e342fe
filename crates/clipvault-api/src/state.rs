//! Application state shared across handlers.

use clipvault_core::Config;
use clipvault_db::VideoStore;
use clipvault_processing::{FastStartRewriter, MediaProber};
use clipvault_storage::{LocalAssets, ObjectStorage};
use std::sync::Arc;

/// Collaborators behind the HTTP surface. Everything that talks to the
/// outside world sits behind a trait so tests can substitute fakes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub videos: Arc<dyn VideoStore>,
    pub objects: Arc<dyn ObjectStorage>,
    pub prober: Arc<dyn MediaProber>,
    pub rewriter: Arc<dyn FastStartRewriter>,
    pub assets: LocalAssets,
}
