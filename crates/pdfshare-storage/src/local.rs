//! Local filesystem blob store.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use futures::stream::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use pdfshare_core::config::StorageConfig;
use pdfshare_core::error::{AppError, ErrorKind};
use pdfshare_core::result::AppResult;
use pdfshare_core::traits::blob_store::{BlobStore, BlobStream};
use pdfshare_core::types::{IncomingBlob, StoredBlob};

use crate::naming::generate_storage_name;

/// The only media type accepted for uploads.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Blob store writing into a directory on the local filesystem.
///
/// Uploads are streamed into `staging` first and renamed into `root` once
/// complete, so `root` only ever holds finished blobs.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    /// Directory holding finished blobs.
    root: PathBuf,
    /// Directory for in-flight uploads.
    staging: PathBuf,
    /// Inclusive size ceiling in bytes.
    max_bytes: u64,
}

impl LocalBlobStore {
    /// Create a store rooted at `root_path`, creating both directories.
    pub async fn new(root_path: &str, staging_path: &str, max_bytes: u64) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        let staging = PathBuf::from(staging_path);
        for dir in [&root, &staging] {
            fs::create_dir_all(dir).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create storage directory: {}", dir.display()),
                    e,
                )
            })?;
        }
        Ok(Self {
            root,
            staging,
            max_bytes,
        })
    }

    /// Create a store from the storage configuration section.
    pub async fn from_config(config: &StorageConfig) -> AppResult<Self> {
        Self::new(
            &config.upload_dir,
            &config.staging_dir,
            config.max_upload_size_bytes,
        )
        .await
    }

    /// Directory holding finished blobs.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a storage path to a file directly under the root.
    ///
    /// Anything other than a single plain file name is rejected.
    fn resolve(&self, storage_path: &str) -> AppResult<PathBuf> {
        let mut components = Path::new(storage_path).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(self.root.join(name)),
            _ => Err(AppError::validation(format!(
                "Invalid storage path: {storage_path}"
            ))),
        }
    }

    /// Best-effort removal of a staging file after a failed upload.
    async fn discard(&self, path: &Path) {
        if let Err(e) = fs::remove_file(path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %e, "Failed to remove staging file");
            }
        }
    }

    /// Stream `stream` into `path`, enforcing the size ceiling.
    async fn write_staged(&self, path: &Path, mut stream: BlobStream<'_>) -> AppResult<u64> {
        let mut file = fs::File::create(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create file: {}", path.display()),
                e,
            )
        })?;

        let mut total_bytes = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                if e.kind() == std::io::ErrorKind::FileTooLarge {
                    AppError::with_source(
                        ErrorKind::PayloadTooLarge,
                        format!("File exceeds maximum upload size of {} bytes", self.max_bytes),
                        e,
                    )
                } else {
                    AppError::with_source(
                        ErrorKind::Validation,
                        format!("Failed to read upload: {e}"),
                        e,
                    )
                }
            })?;
            total_bytes += chunk.len() as u64;
            if total_bytes > self.max_bytes {
                return Err(AppError::payload_too_large(format!(
                    "File exceeds maximum upload size of {} bytes",
                    self.max_bytes
                )));
            }
            file.write_all(&chunk).await.map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to write chunk", e)
            })?;
        }

        file.flush()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to flush file", e))?;
        file.sync_all()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to sync file", e))?;

        Ok(total_bytes)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn accept<'s>(
        &self,
        upload: &IncomingBlob,
        stream: BlobStream<'s>,
    ) -> AppResult<StoredBlob> {
        if !is_pdf_media_type(upload.content_type.as_deref()) {
            return Err(AppError::unsupported_media_type(format!(
                "Only PDF files are accepted, got {}",
                upload.content_type.as_deref().unwrap_or("no content type")
            )));
        }

        let storage_name = generate_storage_name(&upload.field_name, &upload.original_name);
        let staged = self.staging.join(&storage_name);

        let byte_size = match self.write_staged(&staged, stream).await {
            Ok(n) => n,
            Err(e) => {
                self.discard(&staged).await;
                return Err(e);
            }
        };

        let target = self.root.join(&storage_name);
        if let Err(e) = fs::rename(&staged, &target).await {
            self.discard(&staged).await;
            return Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to move upload into place: {storage_name}"),
                e,
            ));
        }

        debug!(storage_name = %storage_name, bytes = byte_size, "Stored blob");
        Ok(StoredBlob {
            storage_path: storage_name.clone(),
            storage_name,
            byte_size,
        })
    }

    async fn remove(&self, storage_path: &str) -> AppResult<()> {
        let full_path = self.resolve(storage_path)?;
        fs::remove_file(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Blob not found: {storage_path}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete blob: {storage_path}"),
                    e,
                )
            }
        })?;
        debug!(storage_path, "Removed blob");
        Ok(())
    }

    async fn exists(&self, storage_path: &str) -> AppResult<bool> {
        let full_path = self.resolve(storage_path)?;
        Ok(fs::try_exists(&full_path).await?)
    }
}

/// Whether a declared content type is the PDF media type.
///
/// Parameters (`; charset=...`) and ASCII case are ignored.
pub fn is_pdf_media_type(declared: Option<&str>) -> bool {
    declared
        .and_then(|value| value.split(';').next())
        .map(|essence| essence.trim().eq_ignore_ascii_case(PDF_MEDIA_TYPE))
        .unwrap_or(false)
}
