//! In-memory blob store for tests and local development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::{BlobError, BlobStore};

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// Blob store keeping objects in a process-local map.
///
/// Not meant for production. The `fail_deletes` switch lets tests simulate
/// a backend that accepts uploads but fails deletes.
#[derive(Debug)]
pub struct MemoryBlobStore {
    base_url: String,
    objects: Mutex<HashMap<String, StoredObject>>,
    fail_deletes: AtomicBool,
}

impl MemoryBlobStore {
    /// Create a store whose object URLs live under `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            objects: Mutex::new(HashMap::new()),
            fail_deletes: AtomicBool::new(false),
        }
    }

    /// Make every subsequent delete fail with a backend error.
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a previously returned URL still resolves to an object.
    pub fn contains_url(&self, url: &str) -> bool {
        match self.key_for(url) {
            Some(key) => self.objects().contains_key(key),
            None => false,
        }
    }

    /// Stored bytes and content type for a URL, if present.
    pub fn object(&self, url: &str) -> Option<(Vec<u8>, String)> {
        let key = self.key_for(url)?;
        self.objects()
            .get(key)
            .map(|stored| (stored.bytes.clone(), stored.content_type.clone()))
    }

    fn objects(&self) -> MutexGuard<'_, HashMap<String, StoredObject>> {
        self.objects
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{key}", self.base_url)
    }

    fn key_for<'a>(&self, url: &'a str) -> Option<&'a str> {
        url.strip_prefix(&self.base_url)
            .map(|rest| rest.trim_start_matches('/'))
            .filter(|key| !key.is_empty())
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BlobError> {
        self.objects().insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(self.url_for(key))
    }

    async fn delete(&self, url: &str) -> Result<(), BlobError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(BlobError::Backend("simulated delete failure".to_string()));
        }
        let key = self
            .key_for(url)
            .ok_or_else(|| BlobError::ForeignUrl(url.to_string()))?;
        // Removing an already-absent key succeeds, matching S3 semantics.
        self.objects().remove(key);
        Ok(())
    }
}
