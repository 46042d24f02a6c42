//! Coupon Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of active coupons a merchant may hold at once
pub const MAX_ACTIVE_COUPONS: i64 = 5;

/// Discount type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Fixed amount off (value=10 means 10.00 off)
    Dollar,
    /// Percentage off (value=30 means 30% off)
    Percent,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dollar => "dollar",
            Self::Percent => "percent",
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is neither `dollar` nor `percent`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDiscountType(pub String);

impl fmt::Display for UnknownDiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown discount type: {}", self.0)
    }
}

impl std::error::Error for UnknownDiscountType {}

impl FromStr for DiscountType {
    type Err = UnknownDiscountType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dollar" => Ok(Self::Dollar),
            "percent" => Ok(Self::Percent),
            other => Err(UnknownDiscountType(other.to_string())),
        }
    }
}

/// Coupon entity
///
/// `discount_type` is `None` when the stored value is absent or not one of
/// the known types. Such rows can only exist if they were written around the
/// lifecycle manager; pricing treats them as "no discount".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coupon {
    pub id: i64,
    pub merchant_id: i64,
    pub name: String,
    pub code: String,
    pub discount_value: f64,
    pub discount_type: Option<DiscountType>,
    pub active: bool,
    /// Number of invoices referencing this coupon
    pub usage_count: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create coupon payload
///
/// Every field is optional at the wire level so that missing values are
/// reported as field errors instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CouponCreate {
    pub name: Option<String>,
    pub code: Option<String>,
    pub discount_value: Option<f64>,
    pub discount_type: Option<String>,
    #[serde(default)]
    pub active: bool,
}

/// Update coupon payload
///
/// `name`, `code`, `discount_value` and `discount_type` are corrective edits.
/// `active` is not applied by the edit itself; the API layer routes it to
/// activate / deactivate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CouponUpdate {
    pub name: Option<String>,
    pub code: Option<String>,
    pub discount_value: Option<f64>,
    pub discount_type: Option<String>,
    pub active: Option<bool>,
}

impl CouponUpdate {
    /// True if the payload touches any editable field
    pub fn has_edits(&self) -> bool {
        self.name.is_some()
            || self.code.is_some()
            || self.discount_value.is_some()
            || self.discount_type.is_some()
    }
}

/// Coupon list filter (`?active=true|false`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CouponFilter {
    pub active: Option<bool>,
}
