//! Static reference data: the federal schedule, regional income tax rates and
//! the team-to-region tables. Everything here is immutable for the lifetime
//! of the process.

pub mod federal;
pub mod regions;
pub mod teams;

pub use federal::single_filer_brackets;
pub use regions::{jurisdiction, rated_regions, region_name, state_tax_rate, team_tax_rate};
pub use teams::{TeamEntry, find_team, teams};
