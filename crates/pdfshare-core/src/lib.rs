//! # pdfshare-core
//!
//! Core crate for PdfShare. Contains the blob store trait, configuration
//! schemas, the catalog record types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other PdfShare crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
