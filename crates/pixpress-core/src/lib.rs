//! Pixpress Core Library
//!
//! This crate provides the domain models, configuration, fingerprinting,
//! size formatting, and the TOTP authorization gate shared across all
//! pixpress components.

pub mod config;
pub mod fingerprint;
pub mod format;
pub mod models;
pub mod totp;

// Re-export commonly used types
pub use config::Config;
pub use fingerprint::Fingerprint;
pub use format::format_size;
pub use models::{EncodedArtifact, PublishResult, SourceImage};
pub use totp::{AuthToken, TotpVerifier};
