//! CORS layer built from `server.cors`.

use std::str::FromStr;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::warn;

use pdfshare_core::config::CorsConfig;

/// Builds the CORS layer for the router.
///
/// A `"*"` entry in origins or headers allows any value. Entries that do not
/// parse are skipped with a warning.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = if allows_any(&config.allowed_origins) {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(parse_entries::<HeaderValue>("origin", &config.allowed_origins))
    };

    let headers = if allows_any(&config.allowed_headers) {
        AllowHeaders::any()
    } else {
        AllowHeaders::list(parse_entries::<HeaderName>("header", &config.allowed_headers))
    };

    let methods = AllowMethods::list(parse_entries::<Method>("method", &config.allowed_methods));

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers(headers)
        .max_age(Duration::from_secs(config.max_age_seconds))
}

fn allows_any(entries: &[String]) -> bool {
    entries.iter().any(|e| e.trim() == "*")
}

fn parse_entries<T: FromStr>(what: &str, entries: &[String]) -> Vec<T> {
    entries
        .iter()
        .filter_map(|entry| match entry.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(entry = %entry, "Ignoring invalid CORS {what}");
                None
            }
        })
        .collect()
}
