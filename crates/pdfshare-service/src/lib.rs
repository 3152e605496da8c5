//! # pdfshare-service
//!
//! Business logic that ties the blob store and the catalog together.

pub mod document;

pub use document::{DocumentService, UploadForm};
