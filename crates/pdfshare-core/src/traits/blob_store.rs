//! Blob store trait for uploaded PDF content.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;
use crate::types::{IncomingBlob, StoredBlob};

/// A borrowed byte stream carrying an upload body.
pub type BlobStream<'a> = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send + 'a>>;

/// Durable byte storage for validated uploads.
///
/// The trait is defined here in `pdfshare-core` and implemented in
/// `pdfshare-storage`.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Validate and persist an upload.
    ///
    /// Fails with `UnsupportedMediaType` before reading the stream when the
    /// declared type is not PDF, and with `PayloadTooLarge` as soon as the
    /// stream passes the size ceiling. On failure nothing is left under the
    /// store root.
    async fn accept<'s>(
        &self,
        upload: &IncomingBlob,
        stream: BlobStream<'s>,
    ) -> AppResult<StoredBlob>;

    /// Delete a blob. Reports `NotFound` when it is already gone.
    async fn remove(&self, storage_path: &str) -> AppResult<()>;

    /// Check whether a blob exists.
    async fn exists(&self, storage_path: &str) -> AppResult<bool>;
}
