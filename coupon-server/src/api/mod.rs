//! HTTP API
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 健康检查 |
//! | /api/merchants/{id} | GET | 商户及优惠券统计 |
//! | /api/merchants/{id}/coupons | GET / POST | 列出 / 创建优惠券 |
//! | /api/merchants/{id}/invoices | GET | 列出商户发票 (?status=) |
//! | /api/coupons/{id} | GET / PATCH | 查询 / 修改优惠券 |
//! | /api/coupons/{id}/activate | POST | 激活优惠券 |
//! | /api/coupons/{id}/deactivate | POST | 停用优惠券 |
//! | /api/invoices/{id}/total | GET | 发票折后金额 |

pub mod coupons;
pub mod health;
pub mod invoices;
pub mod merchants;

use axum::{Router, middleware};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::core::ServerState;

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(merchants::router())
        .merge(coupons::router())
        .merge(invoices::router())
}

/// Build the complete service: routes, state and middleware
pub fn build_router(state: ServerState) -> Router {
    build_app().with_state(state).layer(
        ServiceBuilder::new()
            // HTTP 请求日志中间件
            .layer(middleware::from_fn(log_request))
            .layer(CorsLayer::permissive())
            .layer(CompressionLayer::new()),
    )
}
