//! Coupon API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/coupons", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{id}", get(handler::get_by_id).patch(handler::update))
        .route("/{id}/activate", post(handler::activate))
        .route("/{id}/deactivate", post(handler::deactivate))
}
