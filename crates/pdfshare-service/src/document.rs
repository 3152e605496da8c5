//! Document service: upload, list, and delete flows.

use std::sync::Arc;

use tracing::{error, info, warn};

use pdfshare_catalog::Catalog;
use pdfshare_core::config::{CatalogConfig, StorageConfig};
use pdfshare_core::result::AppResult;
use pdfshare_core::traits::blob_store::{BlobStore, BlobStream};
use pdfshare_core::types::record::default_display_name;
use pdfshare_core::types::{CatalogMap, IncomingBlob, Record, StoredBlob};

/// Optional form fields sent alongside an upload.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    /// Requested category. Empty means the fallback category.
    pub category: Option<String>,
    /// Requested display name. Empty means the original name minus extension.
    pub display_name: Option<String>,
}

/// Coordinates the blob store and the catalog.
///
/// Upload writes the blob before the record exists; delete removes the
/// record before the blob. Either way a listed record always has its blob.
#[derive(Clone)]
pub struct DocumentService {
    /// Record registry.
    catalog: Arc<Catalog>,
    /// Blob storage.
    blobs: Arc<dyn BlobStore>,
    /// Category used when the client sends none.
    fallback_category: String,
    /// URL prefix for download references.
    public_prefix: String,
}

impl std::fmt::Debug for DocumentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentService")
            .field("fallback_category", &self.fallback_category)
            .field("public_prefix", &self.public_prefix)
            .finish()
    }
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        catalog: Arc<Catalog>,
        blobs: Arc<dyn BlobStore>,
        catalog_config: &CatalogConfig,
        storage_config: &StorageConfig,
    ) -> Self {
        Self {
            catalog,
            blobs,
            fallback_category: catalog_config.fallback_category.clone(),
            public_prefix: storage_config.public_prefix.clone(),
        }
    }

    /// The full catalog.
    pub async fn list(&self) -> Arc<CatalogMap> {
        self.catalog.list_all().await
    }

    /// Number of records in the catalog.
    pub async fn record_count(&self) -> usize {
        self.catalog.len().await
    }

    /// Validate and write an upload body to the blob store.
    pub async fn store_blob(
        &self,
        upload: &IncomingBlob,
        stream: BlobStream<'_>,
    ) -> AppResult<StoredBlob> {
        self.blobs.accept(upload, stream).await
    }

    /// Create the record for a stored blob and add it to the catalog.
    ///
    /// If the catalog cannot persist the record, the blob is removed again so
    /// no unreferenced file is left behind.
    pub async fn register(
        &self,
        blob: StoredBlob,
        original_name: &str,
        form: UploadForm,
    ) -> AppResult<Record> {
        let category = non_empty(form.category).unwrap_or_else(|| self.fallback_category.clone());
        let display_name =
            non_empty(form.display_name).unwrap_or_else(|| default_display_name(original_name));

        let record = Record::new(
            &blob,
            original_name,
            category,
            display_name,
            &self.public_prefix,
        );

        if let Err(e) = self.catalog.insert(record.clone()).await {
            self.discard(&blob).await;
            return Err(e);
        }

        info!(
            id = %record.id,
            category = %record.category,
            storage_name = %record.storage_name,
            size = %record.size_label,
            "File uploaded"
        );
        Ok(record)
    }

    /// Store a blob and register it in one step.
    pub async fn upload(
        &self,
        upload: &IncomingBlob,
        stream: BlobStream<'_>,
        form: UploadForm,
    ) -> AppResult<Record> {
        let blob = self.store_blob(upload, stream).await?;
        self.register(blob, &upload.original_name, form).await
    }

    /// Remove a blob that will not be registered.
    pub async fn discard(&self, blob: &StoredBlob) {
        if let Err(e) = self.blobs.remove(&blob.storage_path).await {
            warn!(storage_path = %blob.storage_path, error = %e, "Failed to discard blob");
        }
    }

    /// Delete a record by id, then its blob.
    ///
    /// A blob that is already gone is logged and ignored. Any other removal
    /// failure is returned; the record is gone by then, so at worst an
    /// unreferenced blob remains.
    pub async fn delete(&self, id: &str) -> AppResult<Record> {
        let record = self.catalog.delete_by_id(id).await?;

        match self.blobs.remove(&record.storage_path).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                warn!(id, storage_path = %record.storage_path, "Blob already absent");
            }
            Err(e) => {
                error!(id, storage_path = %record.storage_path, error = %e, "Failed to remove blob");
                return Err(e);
            }
        }

        info!(id, category = %record.category, "File deleted");
        Ok(record)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
