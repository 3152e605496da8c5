//! Blob descriptors exchanged between the HTTP layer and the blob store.

use serde::{Deserialize, Serialize};

/// What the client declared about an uploaded file part.
#[derive(Debug, Clone)]
pub struct IncomingBlob {
    /// Multipart field the file arrived in.
    pub field_name: String,
    /// Client-supplied file name. Untrusted.
    pub original_name: String,
    /// Declared media type of the part, if any.
    pub content_type: Option<String>,
}

/// A blob that has been fully written under the store root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBlob {
    /// Server-generated file name.
    pub storage_name: String,
    /// Location relative to the store root.
    pub storage_path: String,
    /// Number of bytes written.
    pub byte_size: u64,
}
