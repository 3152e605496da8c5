//! Core traits defined in `pdfshare-core` and implemented by other crates.

pub mod blob_store;

pub use blob_store::{BlobStore, BlobStream};
