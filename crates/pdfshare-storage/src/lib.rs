//! # pdfshare-storage
//!
//! Blob store implementation for PdfShare: validated, streamed writes of PDF
//! uploads to the local filesystem and removal of stored blobs.

pub mod local;
pub mod naming;

pub use local::{LocalBlobStore, PDF_MEDIA_TYPE};
