//! Pixpress Processing Library
//!
//! This crate implements the image transform pipeline: decode and
//! normalize an upload, apply resize, rotation, and crop in a fixed
//! order, encode to lossy WebP, and publish the result to storage.

pub mod crop;
pub mod decode;
pub mod encode;
pub mod error;
pub mod orientation;
pub mod params;
pub mod pipeline;
pub mod publish;
pub mod resize;

// Re-export commonly used types
pub use crop::CropBox;
pub use decode::decode_normalized;
pub use encode::{encode_webp, Quality};
pub use error::PipelineError;
pub use orientation::Rotation;
pub use params::ParamsRegistry;
pub use pipeline::{process, transform, TransformParams};
pub use publish::Publisher;
pub use resize::ResizeTarget;
