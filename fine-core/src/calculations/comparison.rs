//! Side-by-side comparison of an athlete's fine with its equivalent for an
//! ordinary worker.

use rust_decimal::Decimal;
use serde::Serialize;

use super::{DeductionEngine, equivalent_fine, fine_percentage, worker_rates};
use crate::request::InputError;
use crate::{DeductionBreakdown, JurisdictionCode};

pub const WEEKS_PER_YEAR: i64 = 52;
pub const HOURS_PER_WEEK_MAX: i64 = 168;

/// How a worker is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkerIncome {
    Salary(Decimal),
    Hourly {
        wage: Decimal,
        hours_per_week: Decimal,
    },
}

impl WorkerIncome {
    /// Hourly pay; `hours_per_week` must fit in a week.
    pub fn hourly(
        wage: Decimal,
        hours_per_week: Decimal,
    ) -> Result<Self, InputError> {
        if hours_per_week < Decimal::ZERO || hours_per_week > Decimal::from(HOURS_PER_WEEK_MAX) {
            return Err(InputError::HoursOutOfRange(hours_per_week));
        }
        if yearly_pay(wage, hours_per_week).is_none() {
            return Err(InputError::AmountTooLarge { field: "wage" });
        }
        Ok(Self::Hourly {
            wage,
            hours_per_week,
        })
    }

    /// Annual gross: the salary, or `wage * hours * 52`, capped at the
    /// decimal range.
    pub fn annual_gross(&self) -> Decimal {
        match *self {
            Self::Salary(salary) => salary,
            Self::Hourly {
                wage,
                hours_per_week,
            } => yearly_pay(wage, hours_per_week).unwrap_or(Decimal::MAX),
        }
    }
}

fn yearly_pay(
    wage: Decimal,
    hours_per_week: Decimal,
) -> Option<Decimal> {
    wage.checked_mul(hours_per_week)?
        .checked_mul(Decimal::from(WEEKS_PER_YEAR))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerProfile {
    pub income: WorkerIncome,
    pub state: JurisdictionCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FineComparison {
    pub fine: Decimal,
    pub fine_percentage: Decimal,
    pub athlete: DeductionBreakdown,
    pub worker: DeductionBreakdown,
    pub equivalent_fine: Decimal,
}

impl FineComparison {
    /// Builds the comparison from an athlete's already computed breakdown.
    pub fn new(
        engine: &DeductionEngine<'_>,
        athlete: DeductionBreakdown,
        fine: Decimal,
        worker: &WorkerProfile,
    ) -> Self {
        let percentage = fine_percentage(fine, athlete.net_income);
        let worker_breakdown =
            engine.compute(worker.income.annual_gross(), &worker_rates(worker.state));
        let equivalent = equivalent_fine(percentage, worker_breakdown.net_income);

        Self {
            fine,
            fine_percentage: percentage,
            athlete,
            worker: worker_breakdown,
            equivalent_fine: equivalent,
        }
    }

    pub fn athlete_remaining(&self) -> Decimal {
        self.athlete.remaining_after_fine(self.fine)
    }

    pub fn worker_remaining(&self) -> Decimal {
        self.worker.remaining_after_fine(self.equivalent_fine)
    }
}
