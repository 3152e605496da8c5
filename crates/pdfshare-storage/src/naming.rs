//! Storage name generation.
//!
//! Names follow `<field>-<unix millis>-<random below 1e9><ext>`. Two uploads
//! collide only if they land in the same millisecond and draw the same random
//! suffix; collisions are neither detected nor retried.

use std::path::Path;

use rand::Rng;

const RANDOM_SUFFIX_BOUND: u32 = 1_000_000_000;

/// Generate a fresh storage name for an upload.
pub fn generate_storage_name(field_name: &str, original_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = rand::thread_rng().gen_range(0..RANDOM_SUFFIX_BOUND);
    format!(
        "{}-{}-{}{}",
        sanitize_field(field_name),
        millis,
        suffix,
        original_extension(original_name)
    )
}

/// The original file's extension including the dot, or an empty string.
///
/// Case is preserved. Extensions with anything but ASCII alphanumerics are
/// dropped since they end up in a served file name.
pub fn original_extension(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}

fn sanitize_field(field_name: &str) -> String {
    let cleaned: String = field_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}
