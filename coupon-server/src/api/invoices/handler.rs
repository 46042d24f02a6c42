//! Invoice API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::pricing;
use crate::utils::AppResult;
use shared::models::InvoiceTotals;

/// GET /api/invoices/:id/total - 发票原价与折后金额
pub async fn total(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<InvoiceTotals>> {
    let totals = pricing::load_invoice_totals(state.pool(), id).await?;
    Ok(Json(totals))
}
