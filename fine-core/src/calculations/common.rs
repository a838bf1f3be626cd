//! Shared helpers for the engine and its presentation layer.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to cents, with midpoints moving away from zero.
///
/// The engine itself never rounds; this is for reports and display.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fine_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(18458187.754)), dec!(18458187.75));
/// assert_eq!(round_half_up(dec!(0.005)), dec!(0.01));
/// assert_eq!(round_half_up(dec!(-2.345)), dec!(-2.35));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
