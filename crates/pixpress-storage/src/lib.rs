//! Pixpress Storage Library
//!
//! This crate provides the storage abstraction and implementations for
//! pixpress: an S3-compatible backend targeting Cloudflare R2, and an
//! in-memory backend for tests.
//!
//! # Storage key format
//!
//! Published images live under `images/{stem}_compressed.webp`. Keys must
//! not contain `..` or a leading `/`.

pub mod memory;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use memory::MemoryStorage;
pub use s3::S3Storage;
pub use traits::{Storage, StorageBackend, StorageError, StorageResult};
