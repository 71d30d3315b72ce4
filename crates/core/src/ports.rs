//! Capabilities the relay pipeline needs from the outside world.
//!
//! Each trait is implemented by an adapter crate (`uploader-slack`,
//! `uploader-storage`, `uploader-shortener`) and by in-memory fakes in tests.
//! Implementations hold no per-request state and are shared behind `Arc`.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::IntegrationError;

/// File access on the platform the event came from.
#[async_trait]
pub trait OriginFiles: Send + Sync {
    /// Downloads a private file using the origin session's own credentials.
    async fn fetch(&self, source_url: &str) -> Result<Bytes, IntegrationError>;

    /// Removes a file from the origin. Uses the elevated (user) credential scope.
    async fn delete(&self, file_id: &str) -> Result<(), IntegrationError>;
}

#[async_trait]
pub trait ConversationPoster: Send + Sync {
    async fn post_thread_reply(
        &self,
        channel: &str,
        thread_ts: &str,
        text: &str,
    ) -> Result<(), IntegrationError>;
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn put(&self, key: &str, content_type: &str, body: Bytes)
        -> Result<(), IntegrationError>;

    /// Signed GET URL for `key`, valid for `expires_in`.
    async fn presign_get(&self, key: &str, expires_in: Duration)
        -> Result<String, IntegrationError>;
}

#[async_trait]
pub trait LinkShortener: Send + Sync {
    async fn shorten(&self, url: &str) -> Result<String, IntegrationError>;
}
