//! Merchant API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::coupons;
use crate::db::repository::{invoice, merchant};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Coupon, CouponCreate, CouponFilter, Invoice, InvoiceFilter, MerchantSummary};

/// GET /api/merchants/:id - 商户及优惠券统计
pub async fn get_summary(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MerchantSummary>> {
    let summary = coupons::merchant_summary(state.pool(), id).await?;
    Ok(Json(summary))
}

/// GET /api/merchants/:id/coupons?active= - 列出商户优惠券
pub async fn list_coupons(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(filter): Query<CouponFilter>,
) -> AppResult<Json<Vec<Coupon>>> {
    let list = coupons::list(state.pool(), id, filter.active).await?;
    Ok(Json(list))
}

/// POST /api/merchants/:id/coupons - 创建优惠券
pub async fn create_coupon(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CouponCreate>,
) -> AppResult<(StatusCode, Json<Coupon>)> {
    let coupon = coupons::create(state.pool(), id, payload).await?;
    tracing::info!(
        coupon_id = coupon.id,
        merchant_id = id,
        code = %coupon.code,
        active = coupon.active,
        "Coupon created"
    );
    Ok((StatusCode::CREATED, Json(coupon)))
}

/// GET /api/merchants/:id/invoices?status= - 列出商户发票
pub async fn list_invoices(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(filter): Query<InvoiceFilter>,
) -> AppResult<Json<Vec<Invoice>>> {
    if !merchant::exists(state.pool(), id).await? {
        return Err(AppError::new(ErrorCode::MerchantNotFound).with_detail("id", id));
    }
    let list = invoice::find_by_merchant(state.pool(), id, filter.status).await?;
    Ok(Json(list))
}
