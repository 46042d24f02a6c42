//! Coupon API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::coupons;
use crate::utils::AppResult;
use shared::models::{Coupon, CouponUpdate};

/// GET /api/coupons/:id - 获取单个优惠券
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Coupon>> {
    let coupon = coupons::get(state.pool(), id).await?;
    Ok(Json(coupon))
}

/// POST /api/coupons/:id/activate - 激活优惠券
pub async fn activate(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Coupon>> {
    let coupon = coupons::activate(state.pool(), id).await?;
    tracing::info!(coupon_id = id, merchant_id = coupon.merchant_id, "Coupon activated");
    Ok(Json(coupon))
}

/// POST /api/coupons/:id/deactivate - 停用优惠券
pub async fn deactivate(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Coupon>> {
    let coupon = coupons::deactivate(state.pool(), id).await?;
    tracing::info!(coupon_id = id, merchant_id = coupon.merchant_id, "Coupon deactivated");
    Ok(Json(coupon))
}

/// PATCH /api/coupons/:id - 修改优惠券
///
/// Field edits and the optional `active` transition are applied together or
/// not at all.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CouponUpdate>,
) -> AppResult<Json<Coupon>> {
    let coupon = coupons::update(state.pool(), id, &payload).await?;
    tracing::info!(coupon_id = id, merchant_id = coupon.merchant_id, active = coupon.active, "Coupon updated");
    Ok(Json(coupon))
}
