//! Shared domain types.

pub mod blob;
pub mod record;

pub use blob::{IncomingBlob, StoredBlob};
pub use record::{CatalogMap, Record};
