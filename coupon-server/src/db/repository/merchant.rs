//! Merchant Repository

use super::{RepoError, RepoResult, coupon};
use shared::models::{Merchant, MerchantCreate, MerchantSummary};
use sqlx::SqlitePool;

const MERCHANT_SELECT: &str = "SELECT id, name, created_at, updated_at FROM merchant";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Merchant>> {
    let sql = format!("{MERCHANT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Merchant>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn exists(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM merchant WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

pub async fn create(pool: &SqlitePool, data: MerchantCreate) -> RepoResult<Merchant> {
    let now = shared::util::now_millis();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO merchant (name, created_at, updated_at) VALUES (?1, ?2, ?2) RETURNING id",
    )
    .bind(&data.name)
    .bind(now)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create merchant".into()))
}

/// Merchant with its coupon counters, `None` if the merchant does not exist
pub async fn find_summary(pool: &SqlitePool, id: i64) -> RepoResult<Option<MerchantSummary>> {
    let Some(merchant) = find_by_id(pool, id).await? else {
        return Ok(None);
    };

    let coupons_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM coupon WHERE merchant_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    let active_coupons_count = coupon::count_active(pool, id).await?;

    let invoice_coupon_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM invoice WHERE merchant_id = ? AND coupon_id IS NOT NULL",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(Some(MerchantSummary {
        merchant,
        coupons_count,
        active_coupons_count,
        invoice_coupon_count,
    }))
}
