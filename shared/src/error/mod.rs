//! Unified error system for the coupon service
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Error body returned by the API
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Merchant errors
//! - 2xxx: Coupon errors
//! - 3xxx: Invoice errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::CouponLimitReached);
//! assert_eq!(err.http_status(), shared::http::StatusCode::UNPROCESSABLE_ENTITY);
//!
//! let err = AppError::with_message(ErrorCode::CouponInvalid, "Coupon is invalid")
//!     .with_detail("field", "code");
//!
//! let response = ApiResponse::error(&err);
//! assert_eq!(response.code, 2002);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
