//! Domain models shared across pixpress components.

use bytes::Bytes;
use serde::Serialize;

use crate::fingerprint::Fingerprint;

/// A single uploaded image: raw bytes plus the filename declared by the
/// caller. Immutable for the duration of one processing session and never
/// persisted.
#[derive(Debug, Clone)]
pub struct SourceImage {
    data: Bytes,
    filename: String,
}

impl SourceImage {
    pub fn new(data: impl Into<Bytes>, filename: impl Into<String>) -> Self {
        SourceImage {
            data: data.into(),
            filename: filename.into(),
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Correlation key for this image's transform parameters.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(&self.data)
    }
}

/// The final lossy-encoded output of the transform pipeline. Derived,
/// never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedArtifact {
    data: Bytes,
}

impl EncodedArtifact {
    pub fn new(data: impl Into<Bytes>) -> Self {
        EncodedArtifact { data: data.into() }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}

/// Outcome of a single publish attempt. Created once per attempt; a retry
/// is a new caller-initiated publish.
#[derive(Debug, Clone, Serialize)]
pub struct PublishResult {
    pub output_key: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PublishResult {
    pub fn published(output_key: impl Into<String>, public_url: impl Into<String>) -> Self {
        PublishResult {
            output_key: output_key.into(),
            success: true,
            public_url: Some(public_url.into()),
            error: None,
        }
    }

    pub fn failed(output_key: impl Into<String>, error: impl Into<String>) -> Self {
        PublishResult {
            output_key: output_key.into(),
            success: false,
            public_url: None,
            error: Some(error.into()),
        }
    }
}
