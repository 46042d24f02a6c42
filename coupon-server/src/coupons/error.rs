//! Coupon lifecycle errors

use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::db::repository::RepoError;

pub const NAME_BLANK: &str = "Name can't be blank";
pub const CODE_BLANK: &str = "Code can't be blank";
pub const CODE_TAKEN: &str = "Code has already been taken";
pub const DISCOUNT_TYPE_INVALID: &str = "Discount type must be dollar or percent";
pub const DISCOUNT_VALUE_BLANK: &str = "Discount value can't be blank";
pub const DISCOUNT_VALUE_NOT_POSITIVE: &str = "Discount value must be greater than 0";
pub const DOLLAR_VALUE_INVALID: &str = "Discount value must be greater than 0 for dollar discounts";
pub const PERCENT_VALUE_INVALID: &str =
    "Discount value must be greater than 0 and at most 100 for percent discounts";

/// Field-level validation messages, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str, message: &str) -> bool {
        self.get(field)
            .is_some_and(|msgs| msgs.iter().any(|m| m == message))
    }

    /// All messages in field order
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.values().flatten().map(String::as_str)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.messages().collect();
        f.write_str(&joined.join(", "))
    }
}

/// Record kinds that can be missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Merchant,
    Coupon,
    Invoice,
}

impl Resource {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::Merchant => ErrorCode::MerchantNotFound,
            Self::Coupon => ErrorCode::CouponNotFound,
            Self::Invoice => ErrorCode::InvoiceNotFound,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Merchant => "Merchant",
            Self::Coupon => "Coupon",
            Self::Invoice => "Invoice",
        })
    }
}

#[derive(Debug, Error)]
pub enum CouponError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("This merchant already has 5 active coupons")]
    Capacity,

    #[error("Coupon cannot be deactivated while there are pending invoices")]
    PendingInvoices,

    #[error("{0} {1} not found")]
    NotFound(Resource, i64),

    #[error("Database error: {0}")]
    Database(String),
}

impl CouponError {
    /// Single-field validation error
    pub fn field(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(field, message);
        Self::Validation(errors)
    }
}

impl From<RepoError> for CouponError {
    fn from(err: RepoError) -> Self {
        match err {
            // Lost a race against the unique index after the pre-check passed
            RepoError::Duplicate(_) => Self::field("code", CODE_TAKEN),
            RepoError::Validation(msg) | RepoError::Database(msg) | RepoError::NotFound(msg) => {
                Self::Database(msg)
            }
        }
    }
}

impl From<sqlx::Error> for CouponError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::from(err).into()
    }
}

impl From<CouponError> for AppError {
    fn from(err: CouponError) -> Self {
        match err {
            CouponError::Validation(fields) => {
                AppError::with_message(ErrorCode::CouponInvalid, format!("Validation failed: {fields}"))
                    .with_detail(
                        "fields",
                        serde_json::to_value(&fields).unwrap_or_default(),
                    )
            }
            CouponError::Capacity => AppError::new(ErrorCode::CouponLimitReached),
            CouponError::PendingInvoices => AppError::new(ErrorCode::CouponHasPendingInvoices),
            CouponError::NotFound(resource, id) => {
                AppError::new(resource.error_code()).with_detail("id", id)
            }
            CouponError::Database(msg) => AppError::database(msg),
        }
    }
}

pub type CouponResult<T> = Result<T, CouponError>;
