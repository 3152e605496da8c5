//! Reading and atomically writing the catalog snapshot file.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tokio::fs;

use pdfshare_core::error::{AppError, ErrorKind};
use pdfshare_core::result::AppResult;
use pdfshare_core::types::CatalogMap;

/// Outcome of reading a snapshot at startup.
#[derive(Debug)]
pub enum SnapshotRead {
    /// No snapshot file exists yet.
    Missing,
    /// The file exists but could not be read or parsed.
    Unreadable(AppError),
    /// The snapshot was parsed.
    Loaded(CatalogMap),
}

/// Read and parse the snapshot at `path`.
pub async fn read_snapshot(path: &Path) -> SnapshotRead {
    let data = match fs::read(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return SnapshotRead::Missing,
        Err(e) => return SnapshotRead::Unreadable(e.into()),
    };

    match serde_json::from_slice::<CatalogMap>(&data) {
        Ok(map) => SnapshotRead::Loaded(map),
        Err(e) => SnapshotRead::Unreadable(e.into()),
    }
}

/// Serialize `map` and replace the snapshot at `path`.
///
/// The content goes to `<path>.tmp` first and is renamed over `path`, so a
/// reader sees either the previous snapshot or the new one in full.
pub async fn write_snapshot(path: &Path, map: &CatalogMap) -> AppResult<()> {
    let data = serde_json::to_vec_pretty(map)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create snapshot directory: {}", parent.display()),
                e,
            )
        })?;
    }

    let tmp = temp_path(path);
    if let Err(e) = fs::write(&tmp, &data).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to write snapshot: {}", tmp.display()),
            e,
        ));
    }

    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to replace snapshot: {}", path.display()),
            e,
        ));
    }

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
