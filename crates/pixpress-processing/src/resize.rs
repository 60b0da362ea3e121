//! Fractional resize presets.

use image::{imageops, imageops::FilterType, RgbImage};

/// Resize preset relative to the source dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResizeTarget {
    #[default]
    Original,
    Half,
    Quarter,
}

impl ResizeTarget {
    pub fn divisor(&self) -> u32 {
        match self {
            ResizeTarget::Original => 1,
            ResizeTarget::Half => 2,
            ResizeTarget::Quarter => 4,
        }
    }

    /// Output dimensions for a given source size. Integer division floors;
    /// each axis is clamped to at least one pixel.
    pub fn target_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        let d = self.divisor();
        ((width / d).max(1), (height / d).max(1))
    }

    /// Resize to exactly the target dimensions. `Original` is an identity.
    pub fn apply(&self, img: RgbImage) -> RgbImage {
        if *self == ResizeTarget::Original {
            return img;
        }
        let (width, height) = img.dimensions();
        let (target_w, target_h) = self.target_dimensions(width, height);
        tracing::debug!(
            from_width = width,
            from_height = height,
            to_width = target_w,
            to_height = target_h,
            "resizing"
        );
        imageops::resize(&img, target_w, target_h, FilterType::Lanczos3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_target_dimensions_floor() {
        assert_eq!(ResizeTarget::Half.target_dimensions(801, 601), (400, 300));
        assert_eq!(ResizeTarget::Quarter.target_dimensions(801, 601), (200, 150));
        assert_eq!(ResizeTarget::Original.target_dimensions(801, 601), (801, 601));
    }

    #[test]
    fn test_tiny_images_never_collapse_to_zero() {
        assert_eq!(ResizeTarget::Quarter.target_dimensions(3, 1), (1, 1));
        assert_eq!(ResizeTarget::Half.target_dimensions(1, 1), (1, 1));
    }

    #[test]
    fn test_apply_produces_exact_dimensions() {
        let img = RgbImage::from_pixel(800, 600, Rgb([120, 130, 140]));
        assert_eq!(ResizeTarget::Half.apply(img.clone()).dimensions(), (400, 300));
        assert_eq!(
            ResizeTarget::Quarter.apply(img.clone()).dimensions(),
            (200, 150)
        );
    }

    #[test]
    fn test_original_is_identity() {
        let img = RgbImage::from_fn(10, 7, |x, y| Rgb([x as u8, y as u8, 0]));
        assert_eq!(ResizeTarget::Original.apply(img.clone()), img);
    }
}
