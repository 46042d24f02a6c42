//! Invoice Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Invoice status
///
/// `Packaged` invoices are pending: they block deactivation of their coupon.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Shipped,
    Packaged,
    Returned,
}

/// Invoice entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Invoice {
    pub id: i64,
    pub customer_id: i64,
    pub merchant_id: i64,
    pub status: InvoiceStatus,
    /// Weak reference, at most one coupon per invoice
    pub coupon_id: Option<i64>,
    pub created_at: i64,
}

/// Invoice list filter (`?status=shipped|packaged|returned`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceFilter {
    pub status: Option<InvoiceStatus>,
}

/// Create invoice payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceCreate {
    pub customer_id: i64,
    pub merchant_id: i64,
    pub status: InvoiceStatus,
    pub coupon_id: Option<i64>,
}

/// Invoice item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItemCreate {
    pub item_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
}

/// Invoice item joined with the owning merchant of its Item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InvoiceLine {
    pub id: i64,
    pub invoice_id: i64,
    pub item_id: i64,
    pub item_merchant_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
}

/// Computed invoice totals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceTotals {
    pub invoice_id: i64,
    pub coupon_id: Option<i64>,
    /// Sum of quantity x unit_price over all lines
    pub raw_total: Decimal,
    /// Portion of raw_total the coupon applies to
    pub applicable_subtotal: Decimal,
    pub discount_amount: Decimal,
    pub discounted_total: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_status_serde() {
        let status: InvoiceStatus = serde_json::from_str("\"packaged\"").unwrap();
        assert_eq!(status, InvoiceStatus::Packaged);
        assert_eq!(
            serde_json::to_string(&InvoiceStatus::Returned).unwrap(),
            "\"returned\""
        );
    }

    #[test]
    fn test_invoice_filter_from_query() {
        let filter: InvoiceFilter = serde_json::from_str(r#"{"status":"packaged"}"#).unwrap();
        assert_eq!(filter.status, Some(InvoiceStatus::Packaged));
        let filter: InvoiceFilter = serde_json::from_str("{}").unwrap();
        assert_eq!(filter.status, None);
    }
}
