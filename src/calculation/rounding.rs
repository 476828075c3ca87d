//! Rounding of emitted amounts.
//!
//! Calculations run at full `Decimal` precision; only values placed in a
//! result are rounded.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Number of months in a fiscal year.
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Rounds a monetary amount to the grosz, midpoint away from zero.
///
/// # Example
///
/// ```
/// use pl_tax_engine::calculation::round_money;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_money(dec!(1773.975)), dec!(1773.98));
/// assert_eq!(round_money(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a ratio to six decimal places.
pub fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(6, RoundingStrategy::MidpointAwayFromZero)
}

/// Divides `part` by `whole`, returning zero when `whole` is not positive.
pub(crate) fn ratio(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_rate(part / whole)
}
