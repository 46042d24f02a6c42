//! Coupon Lifecycle Module
//!
//! Validation and guarded state transitions for merchant coupons.

pub mod error;
mod lifecycle;

pub use error::{CouponError, CouponResult, FieldErrors, Resource};
pub use lifecycle::{activate, create, deactivate, get, list, merchant_summary, update};
