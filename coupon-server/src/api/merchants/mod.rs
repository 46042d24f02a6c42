//! Merchant API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/merchants", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{id}", get(handler::get_summary))
        .route(
            "/{id}/coupons",
            get(handler::list_coupons).post(handler::create_coupon),
        )
        .route("/{id}/invoices", get(handler::list_invoices))
}
