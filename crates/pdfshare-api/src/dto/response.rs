//! Response DTOs.

use serde::{Deserialize, Serialize};

use pdfshare_core::types::Record;

/// Successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Always `true`.
    pub success: bool,
    /// Message.
    pub message: String,
    /// The new record.
    pub file: Record,
}

impl UploadResponse {
    /// Wraps the record of a finished upload.
    pub fn new(file: Record) -> Self {
        Self {
            success: true,
            message: "File uploaded successfully".to_string(),
            file,
        }
    }
}

/// Simple success response with a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Always `true`.
    pub success: bool,
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a successful response.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Uptime.
    pub uptime_seconds: u64,
    /// Records in the catalog.
    pub records: usize,
}
