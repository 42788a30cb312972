//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts are stored as `f64` (SQLite REAL); every arithmetic step goes
//! through `Decimal` and the result is rounded to 2 dp before it is stored.

use rust_decimal::prelude::*;
use shared::models::OrderItemInput;

/// Rounding strategy for monetary values
const DECIMAL_PLACES: u32 = 2;

/// Tolerance when comparing a client subtotal with `quantity * unit_price`
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert f64 to Decimal for calculations
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 dp half away from zero
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round an f64 amount to 2 dp
#[inline]
pub fn round_money(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// Order total: the sum of the line subtotals as supplied, each rounded the
/// same way it is stored
pub fn order_total(items: &[OrderItemInput]) -> f64 {
    let total: Decimal = items
        .iter()
        .map(|i| {
            to_decimal(i.subtotal)
                .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        })
        .sum();
    to_f64(total)
}

/// `quantity * unit_price`
pub fn line_amount(quantity: i64, unit_price: f64) -> Decimal {
    to_decimal(unit_price) * Decimal::from(quantity)
}

/// Whether a supplied subtotal matches `quantity * unit_price` within tolerance
pub fn subtotal_matches(item: &OrderItemInput) -> bool {
    let expected = line_amount(item.quantity, item.unit_price);
    (to_decimal(item.subtotal) - expected).abs() <= MONEY_TOLERANCE
}

/// Average of `total` over `count`; 0 for an empty set
pub fn average(total: f64, count: i64) -> f64 {
    if count <= 0 {
        return 0.0;
    }
    to_f64(to_decimal(total) / Decimal::from(count))
}
