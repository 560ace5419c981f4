//! Convenience result type alias for CertWatch.

use crate::error::AppError;

/// A specialized `Result` type for CertWatch operations.
pub type AppResult<T> = Result<T, AppError>;
