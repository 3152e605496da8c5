//! Catalog record model.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::blob::StoredBlob;

/// Category name → records in append order.
pub type CatalogMap = BTreeMap<String, Vec<Record>>;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Metadata for one stored PDF. Immutable once created.
///
/// The serialized field names are part of the snapshot format and of the
/// HTTP responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Unique identifier across the whole catalog.
    pub id: String,
    /// File name as sent by the client.
    pub original_name: String,
    /// Server-generated blob name.
    pub storage_name: String,
    /// Blob location relative to the store root.
    pub storage_path: String,
    /// Grouping key.
    pub category: String,
    /// User-facing label.
    pub display_name: String,
    /// Local time of the upload, formatted once.
    pub upload_timestamp: String,
    /// Human-readable size, e.g. `2.00 MB`.
    pub size_label: String,
    /// Public path the blob can be fetched from.
    pub download_ref: String,
}

impl Record {
    /// Build the record for a freshly stored blob, stamped with the current
    /// local time and a new time-ordered id.
    pub fn new(
        blob: &StoredBlob,
        original_name: impl Into<String>,
        category: impl Into<String>,
        display_name: impl Into<String>,
        public_prefix: &str,
    ) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            original_name: original_name.into(),
            storage_name: blob.storage_name.clone(),
            storage_path: blob.storage_path.clone(),
            category: category.into(),
            display_name: display_name.into(),
            upload_timestamp: format_upload_timestamp(Local::now()),
            size_label: size_label(blob.byte_size),
            download_ref: format!(
                "{}/{}",
                public_prefix.trim_end_matches('/'),
                blob.storage_name
            ),
        }
    }
}

/// Format a byte count as megabytes with two decimals.
pub fn size_label(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MB)
}

/// Default display name: the client's file name minus its final extension.
///
/// Only the extension is stripped; any directory part the client sent is kept.
pub fn default_display_name(original_name: &str) -> String {
    const SEPARATORS: [char; 2] = ['/', '\\'];
    match original_name.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty() && !stem.ends_with(SEPARATORS) && !ext.contains(SEPARATORS) =>
        {
            stem.to_string()
        }
        _ => original_name.to_string(),
    }
}

/// Format an upload time the way it is shown to users, e.g. `2024/3/7 09:15:02`.
pub fn format_upload_timestamp(at: DateTime<Local>) -> String {
    at.format("%Y/%-m/%-d %H:%M:%S").to_string()
}
