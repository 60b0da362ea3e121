//! Publishing encoded artifacts to storage.

use pixpress_core::{AuthToken, EncodedArtifact, PublishResult};
use pixpress_storage::Storage;
use std::path::Path;
use std::sync::Arc;

const OUTPUT_PREFIX: &str = "images";
const OUTPUT_SUFFIX: &str = "_compressed.webp";
const WEBP_CONTENT_TYPE: &str = "image/webp";

/// Uploads encoded artifacts and derives their public URLs.
///
/// Publishing requires an [`AuthToken`], so the type system guarantees a
/// valid one-time code was presented first. A failed publish is reported
/// in the [`PublishResult`]; retrying is the caller's decision.
pub struct Publisher {
    storage: Arc<dyn Storage>,
    cdn_base_url: String,
}

impl Publisher {
    /// `cdn_base_url` is stored without a trailing slash so URL assembly
    /// is always `base + "/" + key`.
    pub fn new(storage: Arc<dyn Storage>, cdn_base_url: impl Into<String>) -> Self {
        Publisher {
            storage,
            cdn_base_url: cdn_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Storage key for a source filename: the stem with a fixed suffix
    /// under the images prefix. Two sources with the same stem map to the
    /// same key, and the later publish overwrites the earlier object.
    pub fn output_key(filename: &str) -> String {
        let stem = Path::new(filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(filename);
        format!("{OUTPUT_PREFIX}/{stem}{OUTPUT_SUFFIX}")
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.cdn_base_url, key)
    }

    /// Upload one artifact. The result carries either the public URL or
    /// the failure message; storage errors never propagate as Err because
    /// a failed upload is an expected outcome, not a programming error.
    pub async fn publish(
        &self,
        artifact: &EncodedArtifact,
        source_filename: &str,
        _token: &AuthToken,
    ) -> PublishResult {
        let key = Self::output_key(source_filename);
        let start = std::time::Instant::now();

        match self
            .storage
            .put_object(&key, artifact.data().to_vec(), WEBP_CONTENT_TYPE)
            .await
        {
            Ok(()) => {
                let url = self.public_url(&key);
                tracing::info!(
                    key = %key,
                    url = %url,
                    size_bytes = artifact.len(),
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "publish successful"
                );
                PublishResult::published(key, url)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    key = %key,
                    size_bytes = artifact.len(),
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "publish failed"
                );
                PublishResult::failed(key, e.to_string())
            }
        }
    }
}
