//! Invoice Discount Calculator
//!
//! Uses rust_decimal for all arithmetic. Amounts are returned unrounded;
//! callers decide how to present them. Arithmetic saturates at the limits of
//! [`Decimal`] instead of panicking.

use rust_decimal::prelude::*;
use shared::models::{Coupon, DiscountType, InvoiceLine};

/// Convert f64 to Decimal for calculation.
///
/// Values beyond Decimal's range saturate to `Decimal::MAX` / `Decimal::MIN`;
/// NaN becomes zero.
#[inline]
pub(crate) fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        if value.is_nan() {
            Decimal::ZERO
        } else if value.is_sign_positive() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

/// Discount carried by a coupon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discount {
    /// Fixed amount off the applicable subtotal
    Dollar(Decimal),
    /// Percentage (0-100) of the applicable subtotal
    Percent(Decimal),
    /// Stored type was absent or unknown: leaves totals unchanged
    Unrecognized,
}

impl Discount {
    pub fn from_coupon(coupon: &Coupon) -> Self {
        let value = to_decimal(coupon.discount_value);
        match coupon.discount_type {
            Some(DiscountType::Dollar) => Self::Dollar(value),
            Some(DiscountType::Percent) => Self::Percent(value),
            None => Self::Unrecognized,
        }
    }

    /// Amount taken off an applicable subtotal.
    ///
    /// Clamped to `[0, applicable]`, so a discount can neither raise a total
    /// nor reach items outside the coupon's merchant.
    pub fn amount_off(&self, applicable: Decimal) -> Decimal {
        let raw = match *self {
            Self::Dollar(value) => value,
            Self::Percent(value) => applicable.saturating_mul(value / Decimal::ONE_HUNDRED),
            Self::Unrecognized => Decimal::ZERO,
        };
        raw.min(applicable).max(Decimal::ZERO)
    }
}

/// quantity x unit_price for a single line
#[inline]
fn line_total(line: &InvoiceLine) -> Decimal {
    Decimal::from(line.quantity).saturating_mul(to_decimal(line.unit_price))
}

#[inline]
fn sum_lines<'a>(lines: impl Iterator<Item = &'a InvoiceLine>) -> Decimal {
    lines
        .map(line_total)
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount))
}

/// Sum of quantity x unit_price over every line
pub fn raw_total(lines: &[InvoiceLine]) -> Decimal {
    sum_lines(lines.iter())
}

/// Sum over lines whose item belongs to the coupon's merchant.
///
/// Without a coupon every line counts, so this equals [`raw_total`].
pub fn applicable_subtotal(lines: &[InvoiceLine], coupon: Option<&Coupon>) -> Decimal {
    match coupon {
        None => raw_total(lines),
        Some(c) => sum_lines(
            lines
                .iter()
                .filter(|line| line.item_merchant_id == c.merchant_id),
        ),
    }
}

/// Amount the coupon takes off the invoice
pub fn discount_amount(lines: &[InvoiceLine], coupon: Option<&Coupon>) -> Decimal {
    match coupon {
        None => Decimal::ZERO,
        Some(c) => Discount::from_coupon(c).amount_off(applicable_subtotal(lines, coupon)),
    }
}

/// Invoice total after the coupon, never below zero
pub fn discounted_total(lines: &[InvoiceLine], coupon: Option<&Coupon>) -> Decimal {
    raw_total(lines)
        .saturating_sub(discount_amount(lines, coupon))
        .max(Decimal::ZERO)
}
