//! Lossy WebP encoding.

use crate::error::PipelineError;
use bytes::Bytes;
use image::RgbImage;
use pixpress_core::EncodedArtifact;

/// WebP quality in the encoder's 0-100 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub const DEFAULT: Quality = Quality(50);

    pub fn new(value: u8) -> Result<Self, PipelineError> {
        if value > 100 {
            return Err(PipelineError::InvalidQuality(value));
        }
        Ok(Quality(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Quality::DEFAULT
    }
}

/// Encode an RGB raster to lossy WebP. Same raster and quality always
/// produce the same bytes.
pub fn encode_webp(img: &RgbImage, quality: Quality) -> EncodedArtifact {
    let encoder = webp::Encoder::from_rgb(img.as_raw(), img.width(), img.height());
    let encoded = encoder.encode(quality.get() as f32);
    tracing::debug!(
        width = img.width(),
        height = img.height(),
        quality = quality.get(),
        size_bytes = encoded.len(),
        "encoded webp"
    );
    EncodedArtifact::new(Bytes::copy_from_slice(&encoded))
}
