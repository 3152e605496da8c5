//! Route definitions for the PdfShare HTTP API.
//!
//! JSON endpoints live under `/api`, stored blobs are served read-only under
//! the configured public prefix, and everything else falls through to the
//! static front-end directory.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Room for multipart boundaries and form fields on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let storage = &state.config.storage;
    let body_limit = usize::try_from(storage.max_upload_size_bytes + MULTIPART_OVERHEAD_BYTES)
        .unwrap_or(usize::MAX);

    let api_routes = Router::new()
        .merge(document_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .nest_service(
            storage.public_prefix.trim_end_matches('/'),
            ServeDir::new(&storage.upload_dir),
        )
        .fallback_service(ServeDir::new(&storage.public_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// PDF list, upload, delete
fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/pdfs", get(handlers::document::list_pdfs))
        .route("/upload", post(handlers::document::upload_pdf))
        .route("/delete/{id}", delete(handlers::document::delete_pdf))
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
