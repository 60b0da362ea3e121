//! Content fingerprinting for uploaded images.
//!
//! A fingerprint is a 128-bit MD5 digest over the raw upload bytes, rendered
//! as lowercase hex. It is a correlation key (per-image transform parameters
//! are keyed by it so independent images never share state), not a security
//! token.

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable per-image key derived from the raw byte buffer.
///
/// Identical buffers always produce identical fingerprints; any byte change
/// produces a different one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint of a byte buffer. Total: any input is valid,
    /// including empty.
    pub fn of(data: &[u8]) -> Self {
        let digest = Md5::digest(data);
        Fingerprint(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
