//! Invoice totals loader

use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Coupon, InvoiceLine, InvoiceTotals};
use sqlx::SqlitePool;

use super::calculator::{applicable_subtotal, discount_amount, raw_total};
use crate::db::repository::{coupon, invoice};

/// Compute totals from lines and the invoice's coupon (if any)
pub fn invoice_totals(
    invoice_id: i64,
    lines: &[InvoiceLine],
    coupon: Option<&Coupon>,
) -> InvoiceTotals {
    let raw = raw_total(lines);
    let discount = discount_amount(lines, coupon);
    InvoiceTotals {
        invoice_id,
        coupon_id: coupon.map(|c| c.id),
        raw_total: raw,
        applicable_subtotal: applicable_subtotal(lines, coupon),
        discount_amount: discount,
        discounted_total: raw.saturating_sub(discount).max(Decimal::ZERO),
    }
}

/// Load an invoice, its lines and its coupon, then compute totals.
///
/// A coupon reference pointing at a missing row is treated as no coupon.
pub async fn load_invoice_totals(pool: &SqlitePool, invoice_id: i64) -> AppResult<InvoiceTotals> {
    let invoice = invoice::find_by_id(pool, invoice_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::InvoiceNotFound).with_detail("id", invoice_id))?;

    let lines = invoice::find_lines(pool, invoice.id).await?;

    let coupon = match invoice.coupon_id {
        Some(coupon_id) => {
            let found = coupon::find_by_id(pool, coupon_id).await?;
            if found.is_none() {
                tracing::warn!(invoice_id, coupon_id, "Invoice references a missing coupon");
            }
            found
        }
        None => None,
    };

    Ok(invoice_totals(invoice.id, &lines, coupon.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use std::str::FromStr;

    async fn seeded_pool() -> SqlitePool {
        let db = DbService::memory().await.unwrap();
        for sql in [
            "INSERT INTO merchant (id, name) VALUES (1, 'A'), (2, 'B')",
            "INSERT INTO item (id, merchant_id, name, unit_price) VALUES (1, 1, 'Mug', 30), (2, 2, 'Lamp', 70)",
            "INSERT INTO coupon (id, merchant_id, name, code, discount_value, discount_type, active) VALUES (1, 1, 'Half', 'HALF', 50, 'percent', 1)",
            "INSERT INTO invoice (id, customer_id, merchant_id, status, coupon_id) VALUES (1, 9, 1, 'shipped', 1), (2, 9, 1, 'shipped', NULL)",
            // Dangling reference, only possible with foreign keys off
            "PRAGMA foreign_keys = OFF",
            "INSERT INTO invoice (id, customer_id, merchant_id, status, coupon_id) VALUES (3, 9, 1, 'shipped', 404)",
            "PRAGMA foreign_keys = ON",
            "INSERT INTO invoice_item (invoice_id, item_id, quantity, unit_price) VALUES (1, 1, 1, 30), (1, 2, 1, 70), (2, 1, 2, 30)",
        ] {
            sqlx::query(sql).execute(&db.pool).await.unwrap();
        }
        db.pool
    }

    #[tokio::test]
    async fn test_load_totals_with_coupon() {
        let pool = seeded_pool().await;
        let totals = load_invoice_totals(&pool, 1).await.unwrap();
        assert_eq!(totals.coupon_id, Some(1));
        assert_eq!(totals.raw_total, Decimal::from(100));
        assert_eq!(totals.applicable_subtotal, Decimal::from(30));
        assert_eq!(totals.discount_amount, Decimal::from(15));
        assert_eq!(totals.discounted_total, Decimal::from(85));
    }

    #[tokio::test]
    async fn test_load_totals_without_coupon() {
        let pool = seeded_pool().await;
        let totals = load_invoice_totals(&pool, 2).await.unwrap();
        assert_eq!(totals.coupon_id, None);
        assert_eq!(totals.discounted_total, Decimal::from_str("60").unwrap());
        assert_eq!(totals.discounted_total, totals.raw_total);
    }

    #[tokio::test]
    async fn test_missing_coupon_reference_is_no_coupon() {
        let pool = seeded_pool().await;
        let totals = load_invoice_totals(&pool, 3).await.unwrap();
        assert_eq!(totals.coupon_id, None);
        assert_eq!(totals.raw_total, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_unknown_invoice() {
        let pool = seeded_pool().await;
        let err = load_invoice_totals(&pool, 99).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvoiceNotFound);
    }
}
