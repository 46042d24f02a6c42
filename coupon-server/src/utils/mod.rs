//! Utility module - logging and input validation helpers

pub mod logger;
pub mod validation;

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
