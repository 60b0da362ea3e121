//! Upload decoding and normalization.
//!
//! Every upload passes through here exactly once before any transform:
//! the bytes are decoded with a sniffed format, converted to 8-bit RGB
//! (alpha composited away, palettes expanded), and straightened per the
//! EXIF orientation tag. The output carries no metadata, so running a
//! normalized image through again is a no-op.

use crate::error::PipelineError;
use crate::orientation;
use image::{ImageReader, RgbImage};
use std::io::Cursor;

/// Decode raw upload bytes into an upright RGB8 raster.
pub fn decode_normalized(data: &[u8]) -> Result<RgbImage, PipelineError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?;
    let format = reader.format();
    let img = reader.decode()?;
    let rgb = img.to_rgb8();

    tracing::debug!(
        format = ?format,
        width = rgb.width(),
        height = rgb.height(),
        "decoded upload"
    );

    Ok(orientation::apply_exif_orientation(rgb, data))
}
