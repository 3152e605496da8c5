//! Catalog snapshot configuration.

use serde::{Deserialize, Serialize};

/// Catalog persistence and category defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path of the JSON snapshot file.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
    /// Categories that always exist, even when empty.
    #[serde(default = "default_categories")]
    pub default_categories: Vec<String>,
    /// Category assigned when an upload names none.
    #[serde(default = "default_fallback_category")]
    pub fallback_category: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            default_categories: default_categories(),
            fallback_category: default_fallback_category(),
        }
    }
}

fn default_snapshot_path() -> String {
    "./database.json".to_string()
}

fn default_categories() -> Vec<String> {
    vec!["exercise".to_string(), "math".to_string()]
}

fn default_fallback_category() -> String {
    "exercise".to_string()
}
