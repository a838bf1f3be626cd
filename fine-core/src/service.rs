//! Entry point that ties the boundary, the engine and the player snapshot
//! together.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::calculations::{
    DeductionEngine, FederalTaxSchedule, FineComparison, RegionResolution, WorkerProfile,
    fine_percentage, resolve_rates,
};
use crate::request::{CalculationRequest, CalculationResponse};
use crate::snapshot::{PlayerSnapshot, SnapshotError};
use crate::{DeductionBreakdown, DeductionRates};

/// Result of one athlete calculation, with enough context to explain it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationOutcome {
    pub request: CalculationRequest,
    pub region: RegionResolution,
    pub rates: DeductionRates,
    pub breakdown: DeductionBreakdown,
    pub fine_percentage: Decimal,
}

impl CalculationOutcome {
    pub fn response(&self) -> CalculationResponse {
        CalculationResponse::new(&self.breakdown, self.fine_percentage)
    }

    /// Net income still left after paying the fine.
    pub fn remaining_net_income(&self) -> Decimal {
        self.breakdown.remaining_after_fine(self.request.fine)
    }
}

/// An athlete calculation translated to a worker's income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonOutcome {
    pub region: RegionResolution,
    #[serde(flatten)]
    pub comparison: FineComparison,
}

/// Stateless calculator over a fixed federal schedule.
#[derive(Debug, Clone, Default)]
pub struct FineService {
    schedule: FederalTaxSchedule,
}

impl FineService {
    pub fn new(schedule: FederalTaxSchedule) -> Self {
        Self { schedule }
    }

    fn engine(&self) -> DeductionEngine<'_> {
        DeductionEngine::new(&self.schedule)
    }

    pub fn calculate(
        &self,
        request: CalculationRequest,
    ) -> CalculationOutcome {
        let resolution = resolve_rates(&request.team, request.league);
        let breakdown = self.engine().compute(request.gross_salary, &resolution.rates);
        let fine_percentage = fine_percentage(request.fine, breakdown.net_income);

        info!(
            team = %request.team,
            league = ?request.league,
            net = %breakdown.net_income,
            fine_percentage = %fine_percentage,
            "calculated athlete deductions"
        );

        CalculationOutcome {
            request,
            region: resolution.region,
            rates: resolution.rates,
            breakdown,
            fine_percentage,
        }
    }

    /// Runs the athlete calculation and translates the fine to `worker`.
    pub fn compare(
        &self,
        request: CalculationRequest,
        worker: &WorkerProfile,
    ) -> ComparisonOutcome {
        let outcome = self.calculate(request);
        let comparison =
            FineComparison::new(&self.engine(), outcome.breakdown, outcome.request.fine, worker);
        ComparisonOutcome {
            region: outcome.region,
            comparison,
        }
    }

    /// Builds a request from the snapshot record of the player called `name`.
    pub fn request_for_player(
        &self,
        snapshot: &PlayerSnapshot,
        name: &str,
        fine: Decimal,
    ) -> Result<CalculationRequest, SnapshotError> {
        let player = snapshot.find_player(name)?;
        Ok(CalculationRequest {
            gross_salary: player.gross_salary,
            fine,
            team: player.team.clone(),
            league: player.league,
        })
    }

    /// Calculates for a player looked up by name in `snapshot`.
    pub fn calculate_for_player(
        &self,
        snapshot: &PlayerSnapshot,
        name: &str,
        fine: Decimal,
    ) -> Result<CalculationOutcome, SnapshotError> {
        let request = self.request_for_player(snapshot, name, fine)?;
        Ok(self.calculate(request))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::WorkerIncome;
    use crate::{JurisdictionCode, League, PlayerRecord};

    fn request() -> CalculationRequest {
        CalculationRequest {
            gross_salary: dec!(50000000),
            fine: dec!(25000),
            team: "GSW".to_string(),
            league: Some(League::Nba),
        }
    }

    #[test]
    fn calculate_produces_wire_response() {
        let outcome = FineService::default().calculate(request());

        let response = outcome.response();

        assert_eq!(response.deductions.len(), 7);
        assert_eq!(response.deductions["Net Income"], dec!(16816812.25));
        assert_eq!(response.deductions["FICAMedicare"], dec!(725000));
        assert_eq!(
            response.fine_percentage,
            fine_percentage(dec!(25000), dec!(16816812.25))
        );
        assert_eq!(outcome.remaining_net_income(), dec!(16791812.25));
    }

    #[test]
    fn unknown_team_is_reported() {
        let outcome = FineService::default().calculate(CalculationRequest {
            team: "Nowhere".to_string(),
            league: Some(League::Mlb),
            ..request()
        });

        assert_eq!(outcome.region, RegionResolution::UnknownTeam);
        assert_eq!(outcome.breakdown.state, dec!(0));
    }

    #[test]
    fn compare_uses_athlete_fine() {
        let worker = WorkerProfile {
            income: WorkerIncome::Salary(dec!(60000)),
            state: JurisdictionCode::new("TX"),
        };

        let ComparisonOutcome { region, comparison } =
            FineService::default().compare(request(), &worker);

        assert_eq!(region, RegionResolution::Rated(JurisdictionCode::new("CA")));
        assert_eq!(comparison.fine, dec!(25000));
        assert_eq!(comparison.athlete.net_income, dec!(16816812.25));
        assert_eq!(comparison.worker.net_income, dec!(51747));
    }

    #[test]
    fn calculate_for_player_uses_snapshot_record() {
        let snapshot = PlayerSnapshot::new(
            vec![PlayerRecord {
                name: "Stephen Curry".to_string(),
                team: "GSW".to_string(),
                gross_salary: dec!(50000000),
                league: Some(League::Nba),
            }],
            None,
        );
        let service = FineService::default();

        let outcome = service
            .calculate_for_player(&snapshot, "Stephen Curry", dec!(25000))
            .unwrap();

        assert_eq!(outcome.breakdown.net_income, dec!(16816812.25));
        assert_eq!(
            service
                .calculate_for_player(&PlayerSnapshot::default(), "Stephen Curry", dec!(1))
                .map(|o| o.fine_percentage),
            Err(SnapshotError::NotReady)
        );
    }
}
