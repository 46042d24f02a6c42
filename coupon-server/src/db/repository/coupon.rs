//! Coupon Repository
//!
//! Reads decode through [`CouponRow`] so that a bad `discount_type` never
//! fails a query. Activation writes are single guarded statements: the
//! per-merchant capacity check and the pending-invoice check run inside the
//! same `INSERT`/`UPDATE` that changes the row.

use super::{RepoError, RepoResult};
use shared::models::{Coupon, DiscountType};
use sqlx::{SqliteExecutor, SqlitePool};

const COUPON_SELECT: &str = "SELECT c.id, c.merchant_id, c.name, c.code, c.discount_value, c.discount_type, c.active, (SELECT COUNT(*) FROM invoice i WHERE i.coupon_id = c.id) AS usage_count, c.created_at, c.updated_at FROM coupon c";

#[derive(sqlx::FromRow)]
struct CouponRow {
    id: i64,
    merchant_id: i64,
    name: String,
    code: String,
    discount_value: f64,
    discount_type: Option<String>,
    active: bool,
    usage_count: i64,
    created_at: i64,
    updated_at: i64,
}

impl CouponRow {
    fn into_coupon(self) -> Coupon {
        let discount_type = match self.discount_type.as_deref() {
            Some(raw) => raw
                .parse::<DiscountType>()
                .map_err(|e| {
                    tracing::warn!(coupon_id = self.id, discount_type = %raw, error = %e, "Invalid discount_type, treating as none");
                })
                .ok(),
            None => {
                tracing::warn!(coupon_id = self.id, "Missing discount_type, treating as none");
                None
            }
        };

        Coupon {
            id: self.id,
            merchant_id: self.merchant_id,
            name: self.name,
            code: self.code,
            discount_value: self.discount_value,
            discount_type,
            active: self.active,
            usage_count: self.usage_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Validated coupon fields ready to be written
#[derive(Debug, Clone)]
pub struct CouponFields {
    pub name: String,
    pub code: String,
    pub discount_value: f64,
    pub discount_type: DiscountType,
}

// ── Reads ────────────────────────────────────────────────────

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<Coupon>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("{COUPON_SELECT} WHERE c.id = ?");
    let row = sqlx::query_as::<_, CouponRow>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row.map(CouponRow::into_coupon))
}

/// Coupons of a merchant in creation order, optionally filtered by active flag
pub async fn find_by_merchant(
    pool: &SqlitePool,
    merchant_id: i64,
    active: Option<bool>,
) -> RepoResult<Vec<Coupon>> {
    let sql = format!(
        "{COUPON_SELECT} WHERE c.merchant_id = ?1 AND (?2 IS NULL OR c.active = ?2) ORDER BY c.id"
    );
    let rows = sqlx::query_as::<_, CouponRow>(&sql)
        .bind(merchant_id)
        .bind(active)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(CouponRow::into_coupon).collect())
}

pub async fn count_active<'e, E>(executor: E, merchant_id: i64) -> RepoResult<i64>
where
    E: SqliteExecutor<'e>,
{
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM coupon WHERE merchant_id = ? AND active = 1")
            .bind(merchant_id)
            .fetch_one(executor)
            .await?;
    Ok(count)
}

/// Whether `code` is already used by another coupon of the merchant (case-insensitive)
pub async fn code_taken<'e, E>(
    executor: E,
    merchant_id: i64,
    code: &str,
    exclude_id: Option<i64>,
) -> RepoResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let taken: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM coupon WHERE merchant_id = ?1 AND code = ?2 COLLATE NOCASE AND (?3 IS NULL OR id != ?3))",
    )
    .bind(merchant_id)
    .bind(code)
    .bind(exclude_id)
    .fetch_one(executor)
    .await?;
    Ok(taken)
}

// ── Guarded writes ───────────────────────────────────────────

/// Insert a coupon. An active insert only happens while the merchant holds
/// fewer than `max_active` active coupons; `None` means the guard refused it.
pub async fn insert_guarded<'e, E>(
    executor: E,
    merchant_id: i64,
    fields: &CouponFields,
    active: bool,
    max_active: i64,
) -> RepoResult<Option<i64>>
where
    E: SqliteExecutor<'e>,
{
    let now = shared::util::now_millis();
    let id: Option<i64> = sqlx::query_scalar(
        "INSERT INTO coupon (merchant_id, name, code, discount_value, discount_type, active, created_at, updated_at) \
         SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7 \
         WHERE ?6 = 0 OR (SELECT COUNT(*) FROM coupon WHERE merchant_id = ?1 AND active = 1) < ?8 \
         RETURNING id",
    )
    .bind(merchant_id)
    .bind(&fields.name)
    .bind(&fields.code)
    .bind(fields.discount_value)
    .bind(fields.discount_type.as_str())
    .bind(active)
    .bind(now)
    .bind(max_active)
    .fetch_optional(executor)
    .await?;
    Ok(id)
}

/// Set `active = 1` unless `max_active` other coupons of the same merchant are
/// already active. An already-active coupon matches without being touched.
///
/// Returns false when no row matched: the coupon is missing or the cap is reached.
pub async fn activate_guarded<'e, E>(executor: E, id: i64, max_active: i64) -> RepoResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE coupon SET updated_at = CASE WHEN active = 1 THEN updated_at ELSE ?1 END, active = 1 \
         WHERE id = ?2 AND (active = 1 OR (SELECT COUNT(*) FROM coupon o WHERE o.merchant_id = coupon.merchant_id AND o.active = 1 AND o.id != coupon.id) < ?3)",
    )
    .bind(now)
    .bind(id)
    .bind(max_active)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Set `active = 0` unless a `packaged` invoice references the coupon.
///
/// Returns false when no row matched: the coupon is missing or has pending invoices.
pub async fn deactivate_guarded<'e, E>(executor: E, id: i64) -> RepoResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE coupon SET updated_at = CASE WHEN active = 0 THEN updated_at ELSE ?1 END, active = 0 \
         WHERE id = ?2 AND NOT EXISTS (SELECT 1 FROM invoice WHERE coupon_id = ?2 AND status = 'packaged')",
    )
    .bind(now)
    .bind(id)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Overwrite the editable fields. `active` and `merchant_id` are never touched.
pub async fn update_fields<'e, E>(executor: E, id: i64, fields: &CouponFields) -> RepoResult<()>
where
    E: SqliteExecutor<'e>,
{
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE coupon SET name = ?1, code = ?2, discount_value = ?3, discount_type = ?4, updated_at = ?5 WHERE id = ?6",
    )
    .bind(&fields.name)
    .bind(&fields.code)
    .bind(fields.discount_value)
    .bind(fields.discount_type.as_str())
    .bind(now)
    .bind(id)
    .execute(executor)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Coupon {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn test_pool() -> SqlitePool {
        let db = DbService::memory().await.unwrap();
        sqlx::query("INSERT INTO merchant (id, name) VALUES (1, 'Schroeder-Jerde'), (2, 'Klein, Rempel and Jones')")
            .execute(&db.pool)
            .await
            .unwrap();
        db.pool
    }

    fn fields(code: &str) -> CouponFields {
        CouponFields {
            name: format!("{code} coupon"),
            code: code.to_string(),
            discount_value: 10.0,
            discount_type: DiscountType::Dollar,
        }
    }

    #[tokio::test]
    async fn test_insert_guard_refuses_sixth_active() {
        let pool = test_pool().await;
        for i in 0..5 {
            let id = insert_guarded(&pool, 1, &fields(&format!("C{i}")), true, 5)
                .await
                .unwrap();
            assert!(id.is_some());
        }
        let refused = insert_guarded(&pool, 1, &fields("C5"), true, 5).await.unwrap();
        assert!(refused.is_none());
        assert_eq!(count_active(&pool, 1).await.unwrap(), 5);

        // Inactive inserts ignore the cap
        let inactive = insert_guarded(&pool, 1, &fields("C6"), false, 5).await.unwrap();
        assert!(inactive.is_some());
    }

    #[tokio::test]
    async fn test_code_unique_per_merchant_case_insensitive() {
        let pool = test_pool().await;
        let id = insert_guarded(&pool, 1, &fields("SAVE10"), false, 5)
            .await
            .unwrap()
            .unwrap();

        assert!(code_taken(&pool, 1, "save10", None).await.unwrap());
        assert!(!code_taken(&pool, 1, "save10", Some(id)).await.unwrap());
        assert!(!code_taken(&pool, 2, "SAVE10", None).await.unwrap());

        let err = insert_guarded(&pool, 1, &fields("Save10"), false, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_invalid_discount_type_decodes_as_none() {
        let pool = test_pool().await;
        sqlx::query(
            "INSERT INTO coupon (id, merchant_id, name, code, discount_value, discount_type) VALUES (10, 1, 'Odd', 'ODD', 5, 'invalid_type'), (11, 1, 'Bare', 'BARE', 5, NULL)",
        )
        .execute(&pool)
        .await
        .unwrap();

        let odd = find_by_id(&pool, 10).await.unwrap().unwrap();
        assert_eq!(odd.discount_type, None);
        let bare = find_by_id(&pool, 11).await.unwrap().unwrap();
        assert_eq!(bare.discount_type, None);
    }

    #[tokio::test]
    async fn test_find_by_merchant_filter_and_order() {
        let pool = test_pool().await;
        let a = insert_guarded(&pool, 1, &fields("A"), true, 5).await.unwrap().unwrap();
        let b = insert_guarded(&pool, 1, &fields("B"), false, 5).await.unwrap().unwrap();
        insert_guarded(&pool, 2, &fields("A"), true, 5).await.unwrap();

        let all = find_by_merchant(&pool, 1, None).await.unwrap();
        assert_eq!(all.iter().map(|c| c.id).collect::<Vec<_>>(), vec![a, b]);

        let active = find_by_merchant(&pool, 1, Some(true)).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, a);

        let inactive = find_by_merchant(&pool, 1, Some(false)).await.unwrap();
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].id, b);
    }

    #[tokio::test]
    async fn test_activate_guard_counts_other_coupons() {
        let pool = test_pool().await;
        let mut ids = Vec::new();
        for i in 0..5 {
            ids.push(
                insert_guarded(&pool, 1, &fields(&format!("C{i}")), true, 5)
                    .await
                    .unwrap()
                    .unwrap(),
            );
        }
        let extra = insert_guarded(&pool, 1, &fields("EXTRA"), false, 5)
            .await
            .unwrap()
            .unwrap();

        assert!(!activate_guarded(&pool, extra, 5).await.unwrap());
        // Already active coupon still matches
        assert!(activate_guarded(&pool, ids[0], 5).await.unwrap());
        assert!(!activate_guarded(&pool, 999, 5).await.unwrap());
    }
}
