//! Unified error codes for the coupon service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Merchant / catalog errors
//! - 2xxx: Coupon errors
//! - 3xxx: Invoice errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so that clients in any
/// language can match on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 1xxx: Merchant ====================
    /// Merchant not found
    MerchantNotFound = 1001,

    // ==================== 2xxx: Coupon ====================
    /// Coupon not found
    CouponNotFound = 2001,
    /// One or more coupon fields are invalid
    CouponInvalid = 2002,
    /// Merchant already has the maximum number of active coupons
    CouponLimitReached = 2004,
    /// Coupon is referenced by pending invoices
    CouponHasPendingInvoices = 2005,

    // ==================== 3xxx: Invoice ====================
    /// Invoice not found
    InvoiceNotFound = 3001,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    DatabaseError = 9002,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Record not found",
            ErrorCode::AlreadyExists => "Resource already exists",

            // Merchant
            ErrorCode::MerchantNotFound => "Merchant not found",

            // Coupon
            ErrorCode::CouponNotFound => "Coupon not found",
            ErrorCode::CouponInvalid => "Coupon is invalid",
            ErrorCode::CouponLimitReached => "This merchant already has 5 active coupons",
            ErrorCode::CouponHasPendingInvoices => {
                "Coupon cannot be deactivated while there are pending invoices"
            }

            // Invoice
            ErrorCode::InvoiceNotFound => "Invoice not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),

            // Merchant
            1001 => Ok(ErrorCode::MerchantNotFound),

            // Coupon
            2001 => Ok(ErrorCode::CouponNotFound),
            2002 => Ok(ErrorCode::CouponInvalid),
            2004 => Ok(ErrorCode::CouponLimitReached),
            2005 => Ok(ErrorCode::CouponHasPendingInvoices),

            // Invoice
            3001 => Ok(ErrorCode::InvoiceNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}
