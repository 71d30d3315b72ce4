use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use uploader_core::{IntegrationError, ObjectStorage};

use crate::SERVICE;

/// In-process backend; links use a `memory://` scheme and are not fetchable.
#[derive(Debug, Default)]
pub struct MemoryObjectStorage {
    store: InMemory,
}

impl MemoryObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &InMemory {
        &self.store
    }
}

#[async_trait]
impl ObjectStorage for MemoryObjectStorage {
    async fn put(&self, key: &str, content_type: &str, body: Bytes) -> Result<(), IntegrationError> {
        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_owned().into());
        let options = PutOptions { attributes, ..PutOptions::default() };

        self.store
            .put_opts(&Path::from(key), PutPayload::from(body), options)
            .await
            .map(|_| ())
            .map_err(|error| IntegrationError::Transport { service: SERVICE, message: error.to_string() })
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, IntegrationError> {
        Ok(format!("memory://{}?expires_in={}", Path::from(key), expires_in.as_secs()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bytes::Bytes;
    use object_store::path::Path;
    use object_store::{Attribute, ObjectStoreExt};
    use uploader_core::ObjectStorage;

    use super::MemoryObjectStorage;

    #[tokio::test]
    async fn put_stores_bytes_with_content_type() {
        let storage = MemoryObjectStorage::new();

        storage
            .put("uploads/report.zip", "application/zip", Bytes::from_static(b"PK\x03\x04"))
            .await
            .expect("put");

        let result = storage.store().get(&Path::from("uploads/report.zip")).await.expect("get");
        let content_type =
            result.attributes.get(&Attribute::ContentType).map(|value| value.as_ref().to_owned());
        assert_eq!(content_type.as_deref(), Some("application/zip"));
        assert_eq!(result.bytes().await.expect("bytes").as_ref(), b"PK\x03\x04");
    }

    #[tokio::test]
    async fn same_key_is_last_write_wins() {
        let storage = MemoryObjectStorage::new();

        storage.put("report.zip", "application/zip", Bytes::from_static(b"one")).await.expect("put");
        storage.put("report.zip", "application/zip", Bytes::from_static(b"two")).await.expect("put");

        let result = storage.store().get(&Path::from("report.zip")).await.expect("get");
        assert_eq!(result.bytes().await.expect("bytes").as_ref(), b"two");
    }

    #[tokio::test]
    async fn presign_encodes_key_and_expiry() {
        let storage = MemoryObjectStorage::new();

        let url = storage.presign_get("report.zip", Duration::from_secs(60)).await.expect("presign");

        assert_eq!(url, "memory://report.zip?expires_in=60");
    }
}
