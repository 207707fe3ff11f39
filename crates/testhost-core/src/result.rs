//! Convenience result type alias for TestHost.

use crate::error::AppError;

/// A specialized `Result` type for TestHost operations.
pub type AppResult<T> = Result<T, AppError>;
