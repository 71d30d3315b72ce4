//! Object storage adapters for relayed archives.
//!
//! Both backends sit on `object_store`: [`S3ObjectStorage`] talks to AWS S3 or an
//! S3-compatible endpoint and signs GET links locally, [`MemoryObjectStorage`]
//! keeps objects in process for tests and dry runs.

use std::sync::Arc;

use thiserror::Error;
use uploader_core::config::{StorageBackend, StorageConfig};
use uploader_core::ObjectStorage;

mod memory;
mod s3;

pub use memory::MemoryObjectStorage;
pub use s3::{s3_builder, S3ObjectStorage};

pub(crate) const SERVICE: &str = "storage";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage configuration error: {0}")]
    Config(String),
    #[error("failed to build object store client: {0}")]
    Client(#[from] object_store::Error),
}

/// Builds the configured storage backend behind the relay's storage port.
pub fn build_storage(config: &StorageConfig) -> Result<Arc<dyn ObjectStorage>, StorageError> {
    match config.backend {
        StorageBackend::S3 => {
            if config.bucket.trim().is_empty() {
                return Err(StorageError::Config("storage.bucket is not configured".to_owned()));
            }
            if config.region.trim().is_empty() {
                return Err(StorageError::Config("storage.region is not configured".to_owned()));
            }
            Ok(Arc::new(S3ObjectStorage::new(config)?))
        }
        StorageBackend::Memory => Ok(Arc::new(MemoryObjectStorage::new())),
    }
}
