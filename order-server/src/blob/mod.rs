//! Blob sink: best-effort external mirror for rendered documents
//!
//! Upload is attempted once per sub-order. Failure is surfaced as an
//! explicit `Result` that the pipeline logs and discards by policy. It
//! never blocks delivery and never rolls back a persisted order.

pub mod http;

pub use http::HttpBlobSink;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Upload failed: {0}")]
pub struct UploadError(pub String);

/// Remote blob storage capability
#[async_trait]
pub trait BlobSink: Send + Sync {
    /// At-most-once best-effort upload
    async fn upload(&self, bytes: &[u8], remote_name: &str) -> Result<(), UploadError>;
}

/// No-op sink used when no blob endpoint is configured
#[derive(Debug, Default)]
pub struct NullBlobSink;

#[async_trait]
impl BlobSink for NullBlobSink {
    async fn upload(&self, _bytes: &[u8], remote_name: &str) -> Result<(), UploadError> {
        tracing::debug!(remote_name, "blob sink disabled, skipping upload");
        Ok(())
    }
}
