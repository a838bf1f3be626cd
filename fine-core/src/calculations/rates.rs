//! Resolution of the flat-rate deductions for an income context.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use crate::tables::{find_team, state_tax_rate, team_tax_rate};
use crate::{DeductionRates, JurisdictionCode, League, LeagueDeductionRates};

/// Agent commission, charged on every athlete contract.
pub fn agent_fee_rate() -> Decimal {
    Decimal::new(3, 2)
}

/// How the `State` rate was arrived at.
///
/// All non-rated outcomes charge a zero state rate; the variant lets callers
/// report why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "region", rename_all = "camelCase")]
pub enum RegionResolution {
    /// The team plays in a region with a flat rate.
    Rated(JurisdictionCode),
    /// The team was found but its region has no modeled rate.
    UnratedRegion(JurisdictionCode),
    /// No team matched the identifier.
    UnknownTeam,
}

impl RegionResolution {
    pub fn region(&self) -> Option<JurisdictionCode> {
        match self {
            Self::Rated(code) | Self::UnratedRegion(code) => Some(*code),
            Self::UnknownTeam => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateResolution {
    pub rates: DeductionRates,
    pub region: RegionResolution,
}

/// Produces the deduction rates for an athlete on `team` in `league`.
///
/// The team is matched by abbreviation, then by full name, inside `league`
/// when one is given. Escrow, jock tax and FICA Medicare apply only when the
/// caller names basketball or football; the agent fee always applies.
pub fn resolve_rates(
    team: &str,
    league: Option<League>,
) -> RateResolution {
    let region = match find_team(team, league) {
        Some((found_in, entry)) => match team_tax_rate(entry.region) {
            Some(_) => {
                debug!(team, league = %found_in, region = %entry.region, "resolved team region");
                RegionResolution::Rated(entry.region)
            }
            None => {
                warn!(team, region = %entry.region, "team region has no income tax rate; using 0");
                RegionResolution::UnratedRegion(entry.region)
            }
        },
        None => {
            warn!(team, league = ?league, "team not found; using state rate 0");
            RegionResolution::UnknownTeam
        }
    };

    let state = match region {
        RegionResolution::Rated(code) => team_tax_rate(code).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    };

    let league_rates = league
        .filter(League::has_union_deductions)
        .map(|_| LeagueDeductionRates::standard());

    RateResolution {
        rates: DeductionRates {
            state,
            league: league_rates,
            agent_fee: Some(agent_fee_rate()),
        },
        region,
    }
}

/// Rates for an ordinary worker: state income tax only.
pub fn worker_rates(state: JurisdictionCode) -> DeductionRates {
    DeductionRates {
        state: state_tax_rate(state).unwrap_or(Decimal::ZERO),
        league: None,
        agent_fee: None,
    }
}
