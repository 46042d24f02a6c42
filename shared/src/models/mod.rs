//! Data models
//!
//! Shared between coupon-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod coupon;
pub mod invoice;
pub mod item;
pub mod merchant;

// Re-exports
pub use coupon::*;
pub use invoice::*;
pub use item::*;
pub use merchant::*;
