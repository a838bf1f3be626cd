//! Progressive federal income tax.
//!
//! The schedule is walked from the lowest bracket up. Each bracket taxes only
//! the slice of income between the previous limit and its own:
//!
//! | Bracket | Taxable span |
//! |---------|--------------|
//! | first   | `min(remaining, limit[0])` |
//! | i       | `min(remaining, limit[i] - limit[i-1])` |
//! | top     | everything still remaining |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fine_core::calculations::FederalTaxSchedule;
//!
//! let schedule = FederalTaxSchedule::single_filer();
//!
//! assert_eq!(schedule.tax(dec!(0)), dec!(0));
//! assert_eq!(schedule.tax(dec!(11600)), dec!(1160));
//! assert_eq!(schedule.tax(dec!(50000000)), dec!(18458187.75));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use crate::FederalBracket;
use crate::tables::single_filer_brackets;

/// Reasons a bracket schedule is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("no federal brackets provided")]
    NoBrackets,

    #[error("bracket {index} has negative rate {rate}")]
    NegativeRate { index: usize, rate: Decimal },

    #[error("bracket {index} limit {limit} does not exceed the previous limit")]
    NonIncreasingLimit { index: usize, limit: Decimal },

    #[error("bracket {index} is unbounded but is not the top bracket")]
    UnboundedBeforeTop { index: usize },

    #[error("the top bracket must be unbounded")]
    BoundedTopBracket,
}

/// A validated, contiguous bracket schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederalTaxSchedule {
    brackets: Vec<FederalBracket>,
}

impl FederalTaxSchedule {
    /// Validates and wraps `brackets`.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] if the list is empty, a rate is negative,
    /// limits are not strictly increasing from zero, or the unbounded bracket
    /// is missing or not last.
    pub fn new(brackets: Vec<FederalBracket>) -> Result<Self, ScheduleError> {
        if brackets.is_empty() {
            return Err(ScheduleError::NoBrackets);
        }

        let last = brackets.len() - 1;
        let mut previous = Decimal::ZERO;
        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO {
                return Err(ScheduleError::NegativeRate {
                    index,
                    rate: bracket.rate,
                });
            }
            match bracket.limit {
                Some(limit) if limit <= previous => {
                    return Err(ScheduleError::NonIncreasingLimit { index, limit });
                }
                Some(_) if index == last => return Err(ScheduleError::BoundedTopBracket),
                Some(limit) => previous = limit,
                None if index != last => return Err(ScheduleError::UnboundedBeforeTop { index }),
                None => {}
            }
        }

        Ok(Self { brackets })
    }

    /// The built-in single-filer schedule.
    pub fn single_filer() -> Self {
        Self {
            brackets: single_filer_brackets(),
        }
    }

    pub fn brackets(&self) -> &[FederalBracket] {
        &self.brackets
    }

    /// Federal liability on `gross_salary`.
    ///
    /// Zero for zero (or negative) income and non-decreasing in the salary.
    pub fn tax(
        &self,
        gross_salary: Decimal,
    ) -> Decimal {
        let mut remaining = gross_salary;
        let mut previous_limit = Decimal::ZERO;
        let mut total = Decimal::ZERO;

        for bracket in &self.brackets {
            let span = match bracket.limit {
                Some(limit) => remaining.min(limit - previous_limit),
                None => remaining,
            };
            if span <= Decimal::ZERO {
                break;
            }

            total += span * bracket.rate;
            remaining -= span;

            if remaining <= Decimal::ZERO {
                break;
            }
            if let Some(limit) = bracket.limit {
                previous_limit = limit;
            }
        }

        total
    }
}

impl Default for FederalTaxSchedule {
    fn default() -> Self {
        Self::single_filer()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn schedule() -> FederalTaxSchedule {
        FederalTaxSchedule::single_filer()
    }

    // =========================================================================
    // tax tests
    // =========================================================================

    #[test]
    fn tax_is_zero_for_zero_salary() {
        assert_eq!(schedule().tax(dec!(0)), dec!(0));
    }

    #[test]
    fn tax_is_zero_for_negative_salary() {
        assert_eq!(schedule().tax(dec!(-500)), dec!(0));
    }

    #[test]
    fn tax_within_first_bracket() {
        assert_eq!(schedule().tax(dec!(10000)), dec!(1000));
    }

    #[test]
    fn tax_at_first_boundary() {
        assert_eq!(schedule().tax(dec!(11600)), dec!(1160));
    }

    #[test]
    fn tax_in_third_bracket() {
        // 1160 + 35550 * 0.12 + 27850 * 0.22 = 1160 + 4266 + 6127
        assert_eq!(schedule().tax(dec!(75000)), dec!(11553));
    }

    #[test]
    fn tax_at_top_bracket_threshold() {
        // Sum of every bounded bracket taxed in full.
        assert_eq!(schedule().tax(dec!(609350)), dec!(183647.25));
    }

    #[test]
    fn tax_for_fifty_million_is_dominated_by_top_bracket() {
        // 183647.25 + (50000000 - 609350) * 0.37
        assert_eq!(schedule().tax(dec!(50000000)), dec!(18458187.75));
    }

    #[test]
    fn tax_is_non_decreasing() {
        let schedule = schedule();
        let mut previous = Decimal::ZERO;

        for step in 0..=700 {
            let salary = Decimal::from(step * 1_000);
            let tax = schedule.tax(salary);
            assert!(tax >= previous, "tax dropped at salary {salary}");
            previous = tax;
        }
    }

    #[test]
    fn each_boundary_dollar_is_taxed_once_at_the_next_rate() {
        let schedule = schedule();
        let brackets = schedule.brackets();

        for pair in brackets.windows(2) {
            let limit = pair[0].limit.expect("only the top bracket is unbounded");
            let epsilon = dec!(0.01);

            let step = schedule.tax(limit + epsilon) - schedule.tax(limit);

            assert_eq!(step, epsilon * pair[1].rate, "discontinuity at {limit}");
        }
    }

    #[test]
    fn zero_rate_bracket_adds_nothing() {
        let schedule = FederalTaxSchedule::new(vec![
            FederalBracket::new(dec!(0), Some(dec!(10000))),
            FederalBracket::new(dec!(0.20), None),
        ])
        .unwrap();

        assert_eq!(schedule.tax(dec!(10000)), dec!(0));
        assert_eq!(schedule.tax(dec!(9000)), dec!(0));
        assert_eq!(schedule.tax(dec!(15000)), dec!(1000));
    }

    // =========================================================================
    // validation tests
    // =========================================================================

    #[test]
    fn new_rejects_empty_schedule() {
        assert_eq!(FederalTaxSchedule::new(vec![]), Err(ScheduleError::NoBrackets));
    }

    #[test]
    fn new_rejects_negative_rate() {
        let result = FederalTaxSchedule::new(vec![FederalBracket::new(dec!(-0.1), None)]);

        assert_eq!(
            result,
            Err(ScheduleError::NegativeRate {
                index: 0,
                rate: dec!(-0.1)
            })
        );
    }

    #[test]
    fn new_rejects_non_increasing_limits() {
        let result = FederalTaxSchedule::new(vec![
            FederalBracket::new(dec!(0.10), Some(dec!(20000))),
            FederalBracket::new(dec!(0.20), Some(dec!(20000))),
            FederalBracket::new(dec!(0.30), None),
        ]);

        assert_eq!(
            result,
            Err(ScheduleError::NonIncreasingLimit {
                index: 1,
                limit: dec!(20000)
            })
        );
    }

    #[test]
    fn new_rejects_zero_first_limit() {
        let result = FederalTaxSchedule::new(vec![
            FederalBracket::new(dec!(0.10), Some(dec!(0))),
            FederalBracket::new(dec!(0.20), None),
        ]);

        assert_eq!(
            result,
            Err(ScheduleError::NonIncreasingLimit {
                index: 0,
                limit: dec!(0)
            })
        );
    }

    #[test]
    fn new_rejects_unbounded_middle_bracket() {
        let result = FederalTaxSchedule::new(vec![
            FederalBracket::new(dec!(0.10), None),
            FederalBracket::new(dec!(0.20), None),
        ]);

        assert_eq!(result, Err(ScheduleError::UnboundedBeforeTop { index: 0 }));
    }

    #[test]
    fn new_rejects_bounded_top_bracket() {
        let result = FederalTaxSchedule::new(vec![FederalBracket::new(
            dec!(0.10),
            Some(dec!(1000)),
        )]);

        assert_eq!(result, Err(ScheduleError::BoundedTopBracket));
    }

    #[test]
    fn new_accepts_builtin_brackets() {
        let schedule = FederalTaxSchedule::new(single_filer_brackets()).unwrap();

        assert_eq!(schedule, FederalTaxSchedule::default());
    }
}
