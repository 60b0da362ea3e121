//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must
//! implement.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Available storage backend kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::S3 => "s3",
            StorageBackend::Memory => "memory",
        }
    }
}

/// Storage abstraction trait
///
/// All storage backends (R2 via the S3 API, in-memory for tests) implement
/// this trait so the publisher never couples to a specific backend.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload data to a specific storage key, overwriting any existing
    /// object at that key.
    async fn put_object(&self, key: &str, data: Vec<u8>, content_type: &str)
        -> StorageResult<()>;

    /// Check if an object exists at the given key
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

/// Reject keys that escape the bucket namespace.
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() || key.starts_with('/') || key.split('/').any(|part| part == "..") {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_normal_keys() {
        assert!(validate_key("images/photo_compressed.webp").is_ok());
        assert!(validate_key("a/b/c.webp").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_escapes() {
        assert!(validate_key("").is_err());
        assert!(validate_key("/absolute").is_err());
        assert!(validate_key("images/../secrets").is_err());
    }

    #[test]
    fn test_backend_type_names() {
        assert_eq!(StorageBackend::S3.as_str(), "s3");
        assert_eq!(StorageBackend::Memory.as_str(), "memory");
    }
}
