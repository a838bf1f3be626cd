//! Translation of a fine between income contexts via its share of net income.

use rust_decimal::Decimal;

/// The fine as a percentage of net income.
///
/// Zero when net income is zero. The result is otherwise unbounded: it
/// exceeds 100 when the fine is larger than net income and is negative when
/// net income is. Saturates at the decimal range for pathological inputs.
///
/// ```
/// use rust_decimal_macros::dec;
/// use fine_core::calculations::fine_percentage;
///
/// assert_eq!(fine_percentage(dec!(25000), dec!(5000000)), dec!(0.5));
/// assert_eq!(fine_percentage(dec!(25000), dec!(0)), dec!(0));
/// ```
pub fn fine_percentage(
    fine: Decimal,
    net_income: Decimal,
) -> Decimal {
    if net_income.is_zero() {
        return Decimal::ZERO;
    }

    fine.checked_div(net_income)
        .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or_else(|| saturate(fine.is_sign_negative() != net_income.is_sign_negative()))
}

/// The fine that costs `percentage` percent of `net_income`.
///
/// Inverse of [`fine_percentage`] for non-zero net income.
pub fn equivalent_fine(
    percentage: Decimal,
    net_income: Decimal,
) -> Decimal {
    net_income
        .checked_mul(percentage / Decimal::ONE_HUNDRED)
        .unwrap_or_else(|| saturate(percentage.is_sign_negative() != net_income.is_sign_negative()))
}

fn saturate(negative: bool) -> Decimal {
    if negative { Decimal::MIN } else { Decimal::MAX }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn assert_close(actual: Decimal, expected: Decimal) {
        let tolerance = dec!(0.000001);
        assert!(
            (actual - expected).abs() <= tolerance,
            "{actual} is not within {tolerance} of {expected}"
        );
    }

    #[test]
    fn fine_percentage_of_net() {
        assert_eq!(fine_percentage(dec!(25000), dec!(5000000)), dec!(0.5));
    }

    #[test]
    fn fine_percentage_zero_net_is_zero() {
        assert_eq!(fine_percentage(dec!(1000000), dec!(0)), dec!(0));
        assert_eq!(fine_percentage(dec!(0), dec!(0)), dec!(0));
    }

    #[test]
    fn fine_percentage_can_exceed_one_hundred() {
        assert_eq!(fine_percentage(dec!(300), dec!(100)), dec!(300));
    }

    #[test]
    fn fine_percentage_negative_net() {
        assert_eq!(fine_percentage(dec!(50), dec!(-200)), dec!(-25));
    }

    #[test]
    fn fine_percentage_saturates_on_overflow() {
        assert_eq!(
            fine_percentage(Decimal::MAX, dec!(0.0000000001)),
            Decimal::MAX
        );
    }

    #[test]
    fn equivalent_fine_scales_net() {
        assert_eq!(equivalent_fine(dec!(0.5), dec!(48000)), dec!(240));
        assert_eq!(equivalent_fine(dec!(0), dec!(48000)), dec!(0));
    }

    #[test]
    fn round_trip_recovers_percentage() {
        let percentages = [
            dec!(0),
            dec!(0.5),
            dec!(1.25),
            dec!(37.5),
            dec!(100),
            dec!(412.75),
            Decimal::ONE_HUNDRED / dec!(3),
        ];
        let nets = [dec!(0.01), dec!(7), dec!(48213.77), dec!(16816812.25)];

        for p in percentages {
            for n in nets {
                assert_close(fine_percentage(equivalent_fine(p, n), n), p);
            }
        }
    }
}
