//! In-process object storage for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ObjectStorage, StorageError, validate_object_path};

/// Keeps uploaded objects in a map. Can be told to fail every upload.
#[derive(Debug)]
pub struct MemoryObjectStorage {
    objects: RwLock<HashMap<String, Vec<u8>>>,
    public_base_url: String,
    reject_uploads: AtomicBool,
}

impl MemoryObjectStorage {
    /// Creates empty storage serving objects from `public_base_url`.
    #[must_use]
    pub fn new(public_base_url: &str) -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            reject_uploads: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent upload fail with [`StorageError::Rejected`].
    pub fn reject_uploads(&self, reject: bool) {
        self.reject_uploads.store(reject, Ordering::SeqCst);
    }

    /// Number of stored objects.
    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Returns the bytes stored at `path`.
    pub async fn object(&self, path: &str) -> Option<Vec<u8>> {
        self.objects.read().await.get(path).cloned()
    }
}

impl Default for MemoryObjectStorage {
    fn default() -> Self {
        Self::new("http://localhost/storage")
    }
}

#[async_trait]
impl ObjectStorage for MemoryObjectStorage {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        _content_type: Option<&str>,
    ) -> Result<String, StorageError> {
        validate_object_path(path)?;
        if self.reject_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::Rejected {
                status: 503,
                body: "uploads disabled".to_string(),
            });
        }
        let mut objects = self.objects.write().await;
        if objects.contains_key(path) {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }
        objects.insert(path.to_string(), bytes);
        Ok(path.to_string())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{path}", self.public_base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_reports_objects() {
        let storage = MemoryObjectStorage::default();
        assert!(storage.upload("a/b.png", vec![1, 2], None).await.is_ok());
        assert_eq!(storage.object_count().await, 1);
        assert_eq!(storage.object("a/b.png").await, Some(vec![1, 2]));
    }

    #[tokio::test]
    async fn rejecting_mode_stores_nothing() {
        let storage = MemoryObjectStorage::default();
        storage.reject_uploads(true);
        assert!(storage.upload("a/b.png", vec![1], None).await.is_err());
        assert_eq!(storage.object_count().await, 0);
    }
}
