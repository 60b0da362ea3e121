//! Pipeline errors

use thiserror::Error;

/// Errors produced by the transform pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error(
        "Crop box ({left}, {top}, {right}, {bottom}) is invalid for a {width}x{height} image"
    )]
    CropBounds {
        left: u32,
        top: u32,
        right: u32,
        bottom: u32,
        width: u32,
        height: u32,
    },

    #[error("Invalid quality {0}, expected 0-100")]
    InvalidQuality(u8),
}
