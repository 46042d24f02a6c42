//! Shared types for the coupon service
//!
//! Data models, the unified error system and small utilities used by
//! coupon-server and its API clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};
