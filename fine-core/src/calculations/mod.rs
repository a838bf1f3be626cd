//! The deduction engine.
//!
//! Data flows one way: [`resolve_rates`] turns a team and league into flat
//! rates, [`DeductionEngine`] applies them together with the
//! [`FederalTaxSchedule`], and [`fine_percentage`] expresses a fine against the
//! resulting net income. Everything here is pure and synchronous.

pub mod common;
pub mod comparison;
pub mod deductions;
pub mod federal;
pub mod fine;
pub mod rates;

pub use common::round_half_up;
pub use comparison::{FineComparison, WorkerIncome, WorkerProfile};
pub use deductions::DeductionEngine;
pub use federal::{FederalTaxSchedule, ScheduleError};
pub use fine::{equivalent_fine, fine_percentage};
pub use rates::{RateResolution, RegionResolution, agent_fee_rate, resolve_rates, worker_rates};
