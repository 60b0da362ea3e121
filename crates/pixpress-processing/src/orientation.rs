//! Image orientation: EXIF straightening and user-requested rotation.

use exif::{In, Tag};
use image::{imageops, RgbImage};
use std::io::Cursor;

/// User-requested rotation, counter-clockwise in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Rotation {
    #[default]
    None,
    Ccw90,
    Ccw180,
    Ccw270,
}

impl Rotation {
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::None),
            90 => Some(Rotation::Ccw90),
            180 => Some(Rotation::Ccw180),
            270 => Some(Rotation::Ccw270),
            _ => None,
        }
    }

    pub fn degrees(&self) -> u32 {
        match self {
            Rotation::None => 0,
            Rotation::Ccw90 => 90,
            Rotation::Ccw180 => 180,
            Rotation::Ccw270 => 270,
        }
    }

    /// Apply the rotation. The imageops primitives rotate clockwise, so
    /// 90 counter-clockwise is `rotate270` and vice versa.
    pub fn apply(&self, img: RgbImage) -> RgbImage {
        match self {
            Rotation::None => img,
            Rotation::Ccw90 => imageops::rotate270(&img),
            Rotation::Ccw180 => imageops::rotate180(&img),
            Rotation::Ccw270 => imageops::rotate90(&img),
        }
    }
}

/// Read the EXIF orientation tag from raw image bytes.
///
/// Returns the orientation value (1-8), or 1 (normal) when the data has
/// no EXIF segment or no orientation tag.
pub fn read_exif_orientation(data: &[u8]) -> u8 {
    let mut cursor = Cursor::new(data);
    exif::Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|meta| {
            meta.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .and_then(|v| u8::try_from(v).ok())
        .filter(|v| (1..=8).contains(v))
        .unwrap_or(1)
}

/// Get rotation and flip operations needed for a given EXIF orientation.
/// Returns (clockwise rotate angle, flip_horizontal, flip_vertical); the
/// flips apply before the rotation.
fn orientation_transforms(orientation: u8) -> (Option<u16>, bool, bool) {
    match orientation {
        1 => (None, false, false),      // Normal
        2 => (None, true, false),       // Mirror horizontal
        3 => (Some(180), false, false), // Rotate 180
        4 => (None, false, true),       // Mirror vertical
        5 => (Some(270), true, false),  // Mirror horizontal + Rotate 270 CW
        6 => (Some(90), false, false),  // Rotate 90 CW
        7 => (Some(90), true, false),   // Mirror horizontal + Rotate 90 CW
        8 => (Some(270), false, false), // Rotate 270 CW
        _ => (None, false, false),      // Invalid, treat as normal
    }
}

/// Straighten a decoded raster according to the EXIF orientation found in
/// the raw bytes it was decoded from.
pub fn apply_exif_orientation(mut img: RgbImage, data: &[u8]) -> RgbImage {
    let orientation = read_exif_orientation(data);
    let (rotate, flip_h, flip_v) = orientation_transforms(orientation);

    if orientation != 1 {
        tracing::debug!(
            orientation = orientation,
            rotate = ?rotate,
            flip_horizontal = flip_h,
            flip_vertical = flip_v,
            "Applying EXIF orientation"
        );
    }

    // Flips first, then rotation: orientations 5 and 7 decompose as
    // mirror-then-rotate, so rotating first would swap their outputs.
    if flip_h {
        img = imageops::flip_horizontal(&img);
    }
    if flip_v {
        img = imageops::flip_vertical(&img);
    }
    if let Some(angle) = rotate {
        img = match angle {
            90 => imageops::rotate90(&img),
            180 => imageops::rotate180(&img),
            270 => imageops::rotate270(&img),
            _ => img,
        };
    }

    img
}
