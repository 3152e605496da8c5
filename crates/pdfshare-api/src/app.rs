//! Application builder: wires storage, catalog, and service into state and
//! the Axum router.

use std::sync::Arc;

use axum::Router;

use pdfshare_catalog::Catalog;
use pdfshare_core::config::AppConfig;
use pdfshare_core::error::{AppError, ErrorKind};
use pdfshare_core::result::AppResult;
use pdfshare_core::traits::BlobStore;
use pdfshare_service::DocumentService;
use pdfshare_storage::LocalBlobStore;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Creates directories, loads the catalog, and assembles the shared state.
pub async fn build_state(config: AppConfig) -> AppResult<AppState> {
    let prefix = &config.storage.public_prefix;
    if !prefix.starts_with('/') || prefix.trim_end_matches('/').is_empty() {
        return Err(AppError::configuration(format!(
            "storage.public_prefix must be a non-root path starting with '/', got '{prefix}'"
        )));
    }

    create_data_directories(&config).await?;

    let blobs = Arc::new(LocalBlobStore::from_config(&config.storage).await?);
    tracing::info!(upload_dir = %blobs.root().display(), "Blob store ready");

    let catalog = Arc::new(Catalog::load(&config.catalog).await);

    let documents = Arc::new(DocumentService::new(
        catalog,
        blobs as Arc<dyn BlobStore>,
        &config.catalog,
        &config.storage,
    ));

    Ok(AppState::new(config, documents))
}

async fn create_data_directories(config: &AppConfig) -> AppResult<()> {
    let dirs = [
        &config.storage.data_root,
        &config.storage.upload_dir,
        &config.storage.staging_dir,
        &config.storage.public_dir,
    ];

    for dir in dirs {
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create dir '{dir}'"),
                e,
            )
        })?;
    }

    Ok(())
}
