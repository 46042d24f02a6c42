//! Merchant Model

use serde::{Deserialize, Serialize};

/// Merchant entity (coupon owner)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Merchant {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create merchant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantCreate {
    pub name: String,
}

/// Merchant with coupon counters (detail view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantSummary {
    #[serde(flatten)]
    pub merchant: Merchant,
    /// All coupons owned by the merchant, active or not
    pub coupons_count: i64,
    /// Active coupons, never more than five
    pub active_coupons_count: i64,
    /// Invoices of this merchant that carry a coupon
    pub invoice_coupon_count: i64,
}
