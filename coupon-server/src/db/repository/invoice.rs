//! Invoice Repository

use super::{RepoError, RepoResult};
use shared::models::{Invoice, InvoiceCreate, InvoiceItemCreate, InvoiceLine, InvoiceStatus};
use sqlx::SqlitePool;

const INVOICE_SELECT: &str =
    "SELECT id, customer_id, merchant_id, status, coupon_id, created_at FROM invoice";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Invoice>> {
    let sql = format!("{INVOICE_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Invoice>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Invoices of a merchant in creation order, optionally filtered by status
pub async fn find_by_merchant(
    pool: &SqlitePool,
    merchant_id: i64,
    status: Option<InvoiceStatus>,
) -> RepoResult<Vec<Invoice>> {
    let sql = format!("{INVOICE_SELECT} WHERE merchant_id = ?1 AND (?2 IS NULL OR status = ?2) ORDER BY id");
    let rows = sqlx::query_as::<_, Invoice>(&sql)
        .bind(merchant_id)
        .bind(status)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Invoice lines joined with their item's owning merchant, in insertion order
pub async fn find_lines(pool: &SqlitePool, invoice_id: i64) -> RepoResult<Vec<InvoiceLine>> {
    let rows = sqlx::query_as::<_, InvoiceLine>(
        "SELECT ii.id, ii.invoice_id, ii.item_id, it.merchant_id AS item_merchant_id, ii.quantity, ii.unit_price \
         FROM invoice_item ii JOIN item it ON it.id = ii.item_id \
         WHERE ii.invoice_id = ? ORDER BY ii.id",
    )
    .bind(invoice_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: InvoiceCreate) -> RepoResult<Invoice> {
    let now = shared::util::now_millis();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO invoice (customer_id, merchant_id, status, coupon_id, created_at) VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id",
    )
    .bind(data.customer_id)
    .bind(data.merchant_id)
    .bind(data.status)
    .bind(data.coupon_id)
    .bind(now)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create invoice".into()))
}

pub async fn add_item(
    pool: &SqlitePool,
    invoice_id: i64,
    data: InvoiceItemCreate,
) -> RepoResult<i64> {
    if data.quantity <= 0 {
        return Err(RepoError::Validation("quantity must be positive".into()));
    }
    if data.unit_price < 0.0 {
        return Err(RepoError::Validation(
            "unit_price must not be negative".into(),
        ));
    }
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO invoice_item (invoice_id, item_id, quantity, unit_price) VALUES (?1, ?2, ?3, ?4) RETURNING id",
    )
    .bind(invoice_id)
    .bind(data.item_id)
    .bind(data.quantity)
    .bind(data.unit_price)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn update_status(pool: &SqlitePool, id: i64, status: InvoiceStatus) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE invoice SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Invoice {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn test_pool() -> SqlitePool {
        let db = DbService::memory().await.unwrap();
        sqlx::query("INSERT INTO merchant (id, name) VALUES (1, 'A'), (2, 'B')")
            .execute(&db.pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO item (id, merchant_id, name, unit_price) VALUES (1, 1, 'Widget', 20), (2, 2, 'Gadget', 50)")
            .execute(&db.pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO coupon (id, merchant_id, name, code, discount_value, discount_type, active) VALUES (1, 1, 'Ten', 'TEN', 10, 'dollar', 1)")
            .execute(&db.pool)
            .await
            .unwrap();
        db.pool
    }

    #[tokio::test]
    async fn test_lines_carry_item_merchant() {
        let pool = test_pool().await;
        let invoice = create(
            &pool,
            InvoiceCreate {
                customer_id: 7,
                merchant_id: 1,
                status: InvoiceStatus::Shipped,
                coupon_id: Some(1),
            },
        )
        .await
        .unwrap();
        add_item(&pool, invoice.id, InvoiceItemCreate { item_id: 1, quantity: 2, unit_price: 20.0 })
            .await
            .unwrap();
        add_item(&pool, invoice.id, InvoiceItemCreate { item_id: 2, quantity: 1, unit_price: 50.0 })
            .await
            .unwrap();

        let lines = find_lines(&pool, invoice.id).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].item_merchant_id, 1);
        assert_eq!(lines[1].item_merchant_id, 2);
        assert_eq!(invoice.status, InvoiceStatus::Shipped);
    }

    #[tokio::test]
    async fn test_find_by_merchant_status_filter() {
        let pool = test_pool().await;
        for (merchant_id, status) in [
            (1, InvoiceStatus::Shipped),
            (1, InvoiceStatus::Packaged),
            (1, InvoiceStatus::Returned),
            (2, InvoiceStatus::Packaged),
        ] {
            create(
                &pool,
                InvoiceCreate {
                    customer_id: 1,
                    merchant_id,
                    status,
                    coupon_id: None,
                },
            )
            .await
            .unwrap();
        }

        let all = find_by_merchant(&pool, 1, None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|inv| inv.merchant_id == 1));
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));

        let packaged = find_by_merchant(&pool, 1, Some(InvoiceStatus::Packaged))
            .await
            .unwrap();
        assert_eq!(packaged.len(), 1);
        assert_eq!(packaged[0].status, InvoiceStatus::Packaged);

        assert!(find_by_merchant(&pool, 3, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_item_rejects_zero_quantity() {
        let pool = test_pool().await;
        let invoice = create(
            &pool,
            InvoiceCreate {
                customer_id: 1,
                merchant_id: 1,
                status: InvoiceStatus::Packaged,
                coupon_id: None,
            },
        )
        .await
        .unwrap();
        let err = add_item(&pool, invoice.id, InvoiceItemCreate { item_id: 1, quantity: 0, unit_price: 1.0 })
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
