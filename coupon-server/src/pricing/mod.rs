//! Discount Calculator Module
//!
//! Pure invoice arithmetic lives in `calculator`; `totals` loads an invoice
//! with its lines and coupon and runs the calculator over them.

mod calculator;
mod totals;

pub use calculator::*;
pub use totals::{invoice_totals, load_invoice_totals};
