//! SHA-256 content addressing for fetched media.
//!
//! The digest of a response body is the identity of the cached file, so the
//! same bytes always land under the same name regardless of source URL.

use sha2::{Digest, Sha256};

/// Compute SHA-256 of `data` and return the digest as lowercase hex (64 chars).
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    hex::encode(digest)
}
