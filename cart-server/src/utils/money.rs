//! Money calculation utilities using rust_decimal for precision
//!
//! All arithmetic happens on `Decimal`. Cart totals are converted back to
//! `f64` unrounded so they stay equal to Σ price × quantity for any price
//! precision; revenue sums and display strings are rounded to 2 decimal places.

use rust_decimal::prelude::*;
use shared::models::CartItem;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Minor units per major unit (paise per rupee)
const MINOR_UNITS: i64 = 100;

/// Convert f64 to Decimal for calculation
///
/// Non-finite input is logged and treated as zero.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Line total: unit price × quantity
pub fn line_total(item: &CartItem) -> Decimal {
    to_decimal(item.price) * Decimal::from(item.quantity)
}

/// Full re-sum of a cart: Σ price × quantity (not rounded)
pub fn cart_total(items: &[CartItem]) -> f64 {
    items
        .iter()
        .map(line_total)
        .sum::<Decimal>()
        .to_f64()
        .unwrap_or_default()
}

/// Sum a list of amounts with precise arithmetic
pub fn sum_amounts(amounts: impl IntoIterator<Item = f64>) -> f64 {
    to_f64(amounts.into_iter().map(to_decimal).sum())
}

/// Major units → minor units (`round(amount × 100)`)
///
/// Returns `None` for non-finite or out-of-range input.
pub fn to_minor_units(amount: f64) -> Option<i64> {
    if !amount.is_finite() {
        return None;
    }
    (Decimal::from_f64(amount)? * Decimal::from(MINOR_UNITS))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Two-decimal display string, e.g. `40.00`
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", to_f64(to_decimal(value)))
}
