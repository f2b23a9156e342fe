pub mod asset_ref;
pub mod video;

pub use asset_ref::AssetRef;
pub use video::{CreateVideoRequest, Orientation, Video};
