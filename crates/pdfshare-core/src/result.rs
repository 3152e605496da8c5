//! Convenience result type alias for PdfShare.

use crate::error::AppError;

/// A specialized `Result` type for PdfShare operations.
pub type AppResult<T> = Result<T, AppError>;
