//! Item Model

use serde::{Deserialize, Serialize};

/// Catalog item. `merchant_id` decides which coupons apply to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Item {
    pub id: i64,
    pub merchant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub unit_price: f64,
    pub created_at: i64,
}

/// Create item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCreate {
    pub name: String,
    pub description: Option<String>,
    pub unit_price: f64,
}
