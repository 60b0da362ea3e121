//! In-memory storage backend for tests.

use crate::traits::{validate_key, Storage, StorageBackend, StorageError, StorageResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
struct StoredObject {
    data: Vec<u8>,
    content_type: String,
}

/// In-memory storage keyed by storage key. Cloning shares the underlying
/// map, so a test can hold a handle while the publisher owns another.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    objects: Arc<Mutex<HashMap<String, StoredObject>>>,
    fail_uploads: Arc<AtomicBool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `put_object` fail, for exercising error paths.
    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub fn get_object(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().get(key).map(|obj| obj.data.clone())
    }

    pub fn content_type_of(&self, key: &str) -> Option<String> {
        self.lock().get(key).map(|obj| obj.content_type.clone())
    }

    pub fn object_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, StoredObject>> {
        // A poisoned lock only happens if another test thread panicked;
        // propagating the panic is the right behavior there.
        self.objects.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn put_object(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()> {
        validate_key(key)?;
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed(
                "simulated upload failure".to_string(),
            ));
        }
        self.lock().insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        validate_key(key)?;
        Ok(self.lock().contains_key(key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_and_read_back() {
        let storage = MemoryStorage::new();
        storage
            .put_object("images/a.webp", vec![1, 2, 3], "image/webp")
            .await
            .unwrap();

        assert!(storage.exists("images/a.webp").await.unwrap());
        assert_eq!(storage.get_object("images/a.webp"), Some(vec![1, 2, 3]));
        assert_eq!(
            storage.content_type_of("images/a.webp").as_deref(),
            Some("image/webp")
        );
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_key() {
        let storage = MemoryStorage::new();
        storage
            .put_object("images/a.webp", vec![1], "image/webp")
            .await
            .unwrap();
        storage
            .put_object("images/a.webp", vec![2, 2], "image/webp")
            .await
            .unwrap();

        assert_eq!(storage.get_object("images/a.webp"), Some(vec![2, 2]));
        assert_eq!(storage.object_count(), 1);
    }

    #[tokio::test]
    async fn test_simulated_failure() {
        let storage = MemoryStorage::new();
        storage.fail_uploads(true);
        let err = storage
            .put_object("images/a.webp", vec![1], "image/webp")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::UploadFailed(_)));
        assert_eq!(storage.object_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_key_rejected() {
        let storage = MemoryStorage::new();
        let err = storage
            .put_object("../escape", vec![1], "image/webp")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}
