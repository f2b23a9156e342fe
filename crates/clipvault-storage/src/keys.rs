//! Random asset identifiers and object key composition.
//!
//! Every uploaded asset gets a fresh 32-byte CSPRNG identifier encoded as
//! unpadded URL-safe base64, so names are unguessable and cache-friendly.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::RngCore;

const ID_BYTES: usize = 32;

/// Generate a random asset id (43 base64 characters).
pub fn random_asset_id() -> String {
    let mut bytes = [0u8; ID_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Object key for a processed video: `{orientation}/{id}.{ext}`.
pub fn video_object_key(orientation: &str, id: &str, extension: &str) -> String {
    format!("{}/{}.{}", orientation, id, extension)
}

/// Filename for a locally stored thumbnail: `{id}.{ext}`.
pub fn thumbnail_filename(id: &str, extension: &str) -> String {
    format!("{}.{}", id, extension)
}
