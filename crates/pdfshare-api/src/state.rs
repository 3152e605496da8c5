//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use pdfshare_core::config::AppConfig;
use pdfshare_service::DocumentService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Upload, list, and delete flows
    pub documents: Arc<DocumentService>,
    /// Process start, for the health endpoint
    pub started_at: Instant,
}

impl AppState {
    /// Creates the state from its parts.
    pub fn new(config: AppConfig, documents: Arc<DocumentService>) -> Self {
        Self {
            config: Arc::new(config),
            documents,
            started_at: Instant::now(),
        }
    }
}
