//! Application-wide result alias.

use crate::error::AppError;

/// Result type used throughout Beacon.
pub type AppResult<T> = Result<T, AppError>;
