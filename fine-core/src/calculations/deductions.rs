//! Gross salary to net income.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fine_core::League;
//! use fine_core::calculations::{DeductionEngine, FederalTaxSchedule, resolve_rates};
//!
//! let schedule = FederalTaxSchedule::single_filer();
//! let engine = DeductionEngine::new(&schedule);
//! let rates = resolve_rates("GSW", Some(League::Nba)).rates;
//!
//! let breakdown = engine.compute(dec!(50000000), &rates);
//!
//! assert_eq!(breakdown.state, dec!(6500000));
//! assert_eq!(breakdown.net_income, dec!(16816812.25));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use super::FederalTaxSchedule;
use crate::{DeductionBreakdown, DeductionKind, DeductionRates};

/// Applies a federal schedule and a set of flat rates to a gross salary.
#[derive(Debug, Clone, Copy)]
pub struct DeductionEngine<'a> {
    schedule: &'a FederalTaxSchedule,
}

impl<'a> DeductionEngine<'a> {
    pub fn new(schedule: &'a FederalTaxSchedule) -> Self {
        Self { schedule }
    }

    /// Computes every applicable deduction and the resulting net income.
    ///
    /// The federal amount comes from the bracket schedule; the federal entry
    /// in `rates` is only a placeholder. Flat deductions are `gross * rate`.
    /// Nothing is rounded, and net income is negative when deductions exceed
    /// the gross salary.
    pub fn compute(
        &self,
        gross_salary: Decimal,
        rates: &DeductionRates,
    ) -> DeductionBreakdown {
        let mut breakdown = DeductionBreakdown::empty(gross_salary);

        for (kind, rate) in rates.entries() {
            let amount = match kind {
                DeductionKind::Federal => self.schedule.tax(gross_salary),
                _ => gross_salary * rate,
            };
            breakdown.set(kind, amount);
        }

        breakdown.net_income = gross_salary - breakdown.total_deductions();

        debug!(
            gross = %gross_salary,
            deductions = %breakdown.total_deductions(),
            net = %breakdown.net_income,
            "computed deductions"
        );

        breakdown
    }
}
