//! Object storage for product images.
//!
//! The HTTP layer talks to a [`BlobStore`] trait object so the backing
//! store can be an S3-compatible bucket in production and an in-memory map
//! in tests and local development. Keys are namespaced
//! `products/{folder}/...`; the store hands back the public URL for each
//! stored object and accepts that same URL for deletion.

use async_trait::async_trait;

pub mod memory;
pub mod s3;
pub mod slots;

pub use memory::MemoryBlobStore;
pub use s3::{S3BlobStore, S3Settings};

/// Errors surfaced by blob store implementations.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// The URL does not belong to this store's public namespace.
    #[error("url not recognized by this store: {0}")]
    ForeignUrl(String),

    /// The backing service rejected or failed the request.
    #[error("blob backend error: {0}")]
    Backend(String),
}

/// Abstraction over the external object store holding product images.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store an object under `key`, returning its public URL.
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BlobError>;

    /// Delete the object behind a previously returned URL.
    ///
    /// Deleting an object that is already gone is not an error; only
    /// foreign URLs and backend failures are.
    async fn delete(&self, url: &str) -> Result<(), BlobError>;
}
