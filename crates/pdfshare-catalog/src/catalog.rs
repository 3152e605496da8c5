//! The catalog store.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use pdfshare_core::config::CatalogConfig;
use pdfshare_core::error::AppError;
use pdfshare_core::result::AppResult;
use pdfshare_core::types::{CatalogMap, Record};

use crate::snapshot::{SnapshotRead, read_snapshot, write_snapshot};

/// Registry of records grouped by category, mirrored to a snapshot file.
///
/// Every mutation runs under one writer lock: the current map is copied,
/// changed, written to disk, and only then published to readers. A mutation
/// that fails to persist is never visible, and two concurrent mutations can
/// never overwrite each other's snapshot.
#[derive(Debug)]
pub struct Catalog {
    /// Location of the JSON snapshot.
    snapshot_path: PathBuf,
    /// Last persisted state, shared with readers.
    state: RwLock<Arc<CatalogMap>>,
    /// Serializes read-modify-persist sequences.
    writer: Mutex<()>,
}

impl Catalog {
    /// Load the catalog described by the configuration section.
    pub async fn load(config: &CatalogConfig) -> Self {
        Self::load_from(&config.snapshot_path, &config.default_categories).await
    }

    /// Load the snapshot at `path`, seeding `default_categories`.
    ///
    /// A missing or unreadable snapshot yields an empty catalog; this never
    /// fails. Categories from the snapshot are laid over the seeded ones.
    pub async fn load_from(path: impl AsRef<Path>, default_categories: &[String]) -> Self {
        let snapshot_path = path.as_ref().to_path_buf();
        let mut map: CatalogMap = default_categories
            .iter()
            .map(|c| (c.clone(), Vec::new()))
            .collect();

        match read_snapshot(&snapshot_path).await {
            SnapshotRead::Loaded(loaded) => {
                let records: usize = loaded.values().map(Vec::len).sum();
                map.extend(loaded);
                info!(
                    path = %snapshot_path.display(),
                    categories = map.len(),
                    records,
                    "Loaded catalog snapshot"
                );
            }
            SnapshotRead::Missing => {
                info!(path = %snapshot_path.display(), "No catalog snapshot, starting a fresh catalog");
            }
            SnapshotRead::Unreadable(e) => {
                warn!(
                    path = %snapshot_path.display(),
                    error = %e,
                    "Catalog snapshot unreadable, starting a fresh catalog"
                );
            }
        }

        Self {
            snapshot_path,
            state: RwLock::new(Arc::new(map)),
            writer: Mutex::new(()),
        }
    }

    /// Path of the snapshot file.
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// The full catalog as of the last successful mutation.
    pub async fn list_all(&self) -> Arc<CatalogMap> {
        Arc::clone(&*self.state.read().await)
    }

    /// Total number of records across all categories.
    pub async fn len(&self) -> usize {
        self.list_all().await.values().map(Vec::len).sum()
    }

    /// Whether the catalog holds no records.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Append a record to its category and persist.
    ///
    /// Returns only after the snapshot containing the record is on disk.
    pub async fn insert(&self, record: Record) -> AppResult<()> {
        let _guard = self.writer.lock().await;
        let mut next = (**self.state.read().await).clone();

        if next.values().flatten().any(|r| r.id == record.id) {
            return Err(AppError::validation(format!(
                "Duplicate record id: {}",
                record.id
            )));
        }

        let id = record.id.clone();
        let category = record.category.clone();
        next.entry(category.clone()).or_default().push(record);

        self.commit(next).await?;
        info!(id = %id, category = %category, "Record added to catalog");
        Ok(())
    }

    /// Remove the first record with `id`, whatever its category, and persist.
    ///
    /// The removed record is returned so the caller can delete its blob; the
    /// snapshot no longer references it by then.
    pub async fn delete_by_id(&self, id: &str) -> AppResult<Record> {
        let _guard = self.writer.lock().await;
        let mut next = (**self.state.read().await).clone();

        let removed = next
            .values_mut()
            .find_map(|records| {
                records
                    .iter()
                    .position(|r| r.id == id)
                    .map(|index| records.remove(index))
            })
            .ok_or_else(|| AppError::not_found("file not found"))?;

        self.commit(next).await?;
        info!(id = %id, category = %removed.category, "Record removed from catalog");
        Ok(removed)
    }

    /// Write the current catalog to the snapshot file.
    pub async fn persist(&self) -> AppResult<()> {
        let _guard = self.writer.lock().await;
        let current = self.list_all().await;
        write_snapshot(&self.snapshot_path, &current).await?;
        debug!(path = %self.snapshot_path.display(), "Catalog persisted");
        Ok(())
    }

    /// Persist `next` and publish it. The caller holds the writer lock.
    async fn commit(&self, next: CatalogMap) -> AppResult<()> {
        write_snapshot(&self.snapshot_path, &next).await?;
        *self.state.write().await = Arc::new(next);
        Ok(())
    }
}
