//! The transform pipeline: resize, rotate, crop, encode, in that order.
//!
//! The order is part of the contract. Crop coordinates refer to the image
//! as it looks after resize and rotation, which is what an operator sees
//! when picking a region from a preview.

use crate::crop::CropBox;
use crate::encode::{encode_webp, Quality};
use crate::error::PipelineError;
use crate::orientation::Rotation;
use crate::resize::ResizeTarget;
use image::RgbImage;
use pixpress_core::EncodedArtifact;

/// Per-image transform settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformParams {
    pub resize: ResizeTarget,
    pub rotate: Rotation,
    pub crop: Option<CropBox>,
    pub quality: Quality,
}

/// Apply the geometric transforms to a normalized raster.
pub fn transform(img: RgbImage, params: &TransformParams) -> Result<RgbImage, PipelineError> {
    let mut img = params.resize.apply(img);
    img = params.rotate.apply(img);
    if let Some(crop) = &params.crop {
        img = crop.apply(&img)?;
    }
    Ok(img)
}

/// Run the full pipeline and produce the encoded output.
pub fn process(
    img: RgbImage,
    params: &TransformParams,
) -> Result<EncodedArtifact, PipelineError> {
    let transformed = transform(img, params)?;
    Ok(encode_webp(&transformed, params.quality))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 0])
        })
    }

    #[test]
    fn test_default_params_are_identity_geometry() {
        let img = gradient(800, 600);
        let out = transform(img.clone(), &TransformParams::default()).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_resize_runs_before_rotation() {
        // 800x600, half -> 400x300, then 90 CCW -> 300x400
        let params = TransformParams {
            resize: ResizeTarget::Half,
            rotate: Rotation::Ccw90,
            ..Default::default()
        };
        let out = transform(gradient(800, 600), &params).unwrap();
        assert_eq!(out.dimensions(), (300, 400));
    }

    #[test]
    fn test_crop_sees_post_rotation_coordinates() {
        // Each pixel of the 8x6 source encodes its own (x, y)
        let img = RgbImage::from_fn(8, 6, |x, y| Rgb([x as u8, y as u8, 0]));
        let params = TransformParams {
            rotate: Rotation::Ccw90,
            crop: Some(CropBox::new(2, 3, 5, 7)),
            ..Default::default()
        };
        let out = transform(img.clone(), &params).unwrap();
        assert_eq!(out.dimensions(), (3, 4));

        // 90 CCW puts source pixel (W-1-y, x) at rotated (x, y); the crop
        // then shifts by its (left, top) = (2, 3)
        assert_eq!(out.get_pixel(0, 0), &Rgb([4, 2, 0]));
        assert_eq!(out.get_pixel(2, 0), &Rgb([4, 4, 0]));
        assert_eq!(out.get_pixel(0, 3), &Rgb([1, 2, 0]));
        assert_eq!(out.get_pixel(2, 3), &Rgb([1, 4, 0]));

        // The same box without rotation overflows the 8x6 frame
        let params = TransformParams {
            crop: Some(CropBox::new(2, 3, 5, 7)),
            ..Default::default()
        };
        let err = transform(img, &params).unwrap_err();
        assert!(matches!(err, PipelineError::CropBounds { .. }));
    }

    #[test]
    fn test_full_pipeline_output_dimensions() {
        // 800x600 -> half -> 400x300 -> 90 CCW -> 300x400 -> crop 200x100
        let params = TransformParams {
            resize: ResizeTarget::Half,
            rotate: Rotation::Ccw90,
            crop: Some(CropBox::new(50, 100, 250, 200)),
            quality: Quality::default(),
        };
        let artifact = process(gradient(800, 600), &params).unwrap();
        let decoded = image::load_from_memory(artifact.data()).unwrap();
        assert_eq!(decoded.width(), 200);
        assert_eq!(decoded.height(), 100);
    }

    #[test]
    fn test_process_is_deterministic() {
        let params = TransformParams {
            resize: ResizeTarget::Quarter,
            quality: Quality::new(70).unwrap(),
            ..Default::default()
        };
        let a = process(gradient(320, 240), &params).unwrap();
        let b = process(gradient(320, 240), &params).unwrap();
        assert_eq!(a.data(), b.data());
    }
}
