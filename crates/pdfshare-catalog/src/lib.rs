//! # pdfshare-catalog
//!
//! The catalog of uploaded PDFs: records grouped by category, held in memory
//! and mirrored to a JSON snapshot after every mutation.

pub mod catalog;
pub mod snapshot;

pub use catalog::Catalog;
