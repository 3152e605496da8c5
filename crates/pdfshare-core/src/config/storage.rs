//! Blob storage configuration.

use serde::{Deserialize, Serialize};

/// Where uploaded blobs live and how they are validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for runtime data.
    #[serde(default = "default_data_root")]
    pub data_root: String,
    /// Directory holding finished blobs. Served under `public_prefix`.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// Directory for in-flight uploads. Must share a filesystem with
    /// `upload_dir` so the final rename is atomic.
    #[serde(default = "default_staging_dir")]
    pub staging_dir: String,
    /// Directory with the static front-end.
    #[serde(default = "default_public_dir")]
    pub public_dir: String,
    /// URL prefix under which blobs are exposed.
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,
    /// Maximum accepted blob size in bytes, inclusive (default 50 MiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Multipart field carrying the file.
    #[serde(default = "default_upload_field")]
    pub upload_field: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            upload_dir: default_upload_dir(),
            staging_dir: default_staging_dir(),
            public_dir: default_public_dir(),
            public_prefix: default_public_prefix(),
            max_upload_size_bytes: default_max_upload(),
            upload_field: default_upload_field(),
        }
    }
}

fn default_data_root() -> String {
    "./data".to_string()
}

fn default_upload_dir() -> String {
    "./uploads".to_string()
}

fn default_staging_dir() -> String {
    "./data/tmp".to_string()
}

fn default_public_dir() -> String {
    "./public".to_string()
}

fn default_public_prefix() -> String {
    "/pdfs".to_string()
}

fn default_max_upload() -> u64 {
    52_428_800 // 50 MiB
}

fn default_upload_field() -> String {
    "pdf".to_string()
}
