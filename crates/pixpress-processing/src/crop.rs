//! Rectangular crop with strict bounds checking.
//!
//! A crop box that does not fit inside the image is rejected outright
//! rather than clamped, so the caller always gets exactly the region it
//! asked for or an error naming the offending box.

use crate::error::PipelineError;
use image::{imageops, RgbImage};

/// Pixel-coordinate crop region. `left`/`top` are inclusive, `right`/
/// `bottom` exclusive, matching the usual box convention where the output
/// is `(right - left) x (bottom - top)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropBox {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        CropBox {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Check the box against an image size: both axes must be non-empty
    /// and the box must lie fully inside the image.
    pub fn validate(&self, width: u32, height: u32) -> Result<(), PipelineError> {
        let ok = self.left < self.right
            && self.right <= width
            && self.top < self.bottom
            && self.bottom <= height;
        if ok {
            Ok(())
        } else {
            Err(PipelineError::CropBounds {
                left: self.left,
                top: self.top,
                right: self.right,
                bottom: self.bottom,
                width,
                height,
            })
        }
    }

    pub fn output_dimensions(&self) -> (u32, u32) {
        (self.right - self.left, self.bottom - self.top)
    }

    /// Validate against the image and extract the region.
    pub fn apply(&self, img: &RgbImage) -> Result<RgbImage, PipelineError> {
        let (width, height) = img.dimensions();
        self.validate(width, height)?;
        let (out_w, out_h) = self.output_dimensions();
        Ok(imageops::crop_imm(img, self.left, self.top, out_w, out_h).to_image())
    }
}
