//! ClipVault storage layer.
//!
//! Two backends with different jobs: `S3Storage` holds processed videos in a
//! private bucket (read access only via presigned URLs), and `LocalAssets`
//! holds thumbnail files under a directory served by the API.
//!
//! Object keys for videos follow `{orientation}/{random}.{ext}` where
//! `{random}` is a 32-byte CSPRNG value in unpadded URL-safe base64. Key
//! generation is centralized in the `keys` module.

pub mod keys;
pub mod local;
pub mod s3;
pub mod traits;

pub use local::LocalAssets;
pub use s3::S3Storage;
pub use traits::{ObjectStorage, StorageError, StorageResult};
