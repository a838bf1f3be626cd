use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use fine_core::calculations::{WorkerIncome, WorkerProfile};
use fine_core::db::{DbConfig, RepositoryRegistry};
use fine_core::request::{parse_amount, parse_league, parse_state};
use fine_core::tables::{rated_regions, teams};
use fine_core::{
    CalculationRequest, ComparisonOutcome, FineService, InputError, JurisdictionCode,
    PlayerSnapshot, SnapshotStore,
};
use fine_data::PlayerFileFactory;
use fine_db_sqlite::SqliteRepositoryFactory;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{AthleteArgs, Cli, Command, CompareArgs};
use crate::config::AppConfig;
use crate::format::parse_money;
use crate::report;

/// Effective settings: command-line flags over the config file over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub db: DbConfig,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(
        cli: &Cli,
        config: AppConfig,
    ) -> Self {
        let mut db = config.db_config();
        if let Some(backend) = &cli.db_backend {
            db.backend = backend.to_ascii_lowercase();
        }
        if let Some(connection) = &cli.db {
            db.connection_string = connection.clone();
        }

        Self {
            db,
            log_level: cli.log_level.clone().unwrap_or(config.logging.level),
            log_file: cli.log_file.clone().or(config.logging.file),
        }
    }
}

/// Every storage backend this binary can open.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(PlayerFileFactory));
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

/// Opens the configured backend and reads the current player snapshot.
pub async fn load_snapshot(
    registry: &RepositoryRegistry,
    config: &DbConfig,
) -> Result<Arc<PlayerSnapshot>> {
    let repository = registry.create(config).await.with_context(|| {
        format!(
            "failed to open {} player store '{}'",
            config.backend, config.connection_string
        )
    })?;

    let store = SnapshotStore::default();
    let count = store
        .refresh_from(repository.as_ref())
        .await
        .context("failed to read player snapshot")?;
    info!(players = count, backend = %config.backend, "player snapshot loaded");

    Ok(store.current())
}

impl Command {
    /// Whether the command reads the player snapshot.
    pub fn needs_snapshot(&self) -> bool {
        match self {
            Command::Calculate(args) => args.player.is_some(),
            Command::Compare(args) => args.athlete.player.is_some(),
            Command::Teams(_) | Command::Players(_) => true,
            Command::States | Command::Catalogue(_) => false,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonOutput<'a> {
    you: &'a WorkerProfile,
    #[serde(flatten)]
    outcome: &'a ComparisonOutcome,
}

#[derive(Serialize)]
struct StateRate {
    code: JurisdictionCode,
    name: &'static str,
    rate: Decimal,
}

pub struct App {
    service: FineService,
    json: bool,
}

impl App {
    pub fn new(
        service: FineService,
        json: bool,
    ) -> Self {
        Self { service, json }
    }

    /// Runs `command` and returns what should be printed.
    pub fn execute(
        &self,
        command: &Command,
        snapshot: &PlayerSnapshot,
    ) -> Result<String> {
        debug!(?command, "executing");
        match command {
            Command::Calculate(args) => {
                let outcome = self.service.calculate(self.athlete(args, snapshot)?);
                self.render(&outcome.response(), || report::calculation(&outcome))
            }
            Command::Compare(args) => self.compare(args, snapshot),
            Command::Teams(filter) => {
                let league = parse_league(filter.league.as_deref())?;
                let names = snapshot.teams(league)?;
                self.render(&names, || report::names(&names))
            }
            Command::Players(args) => {
                let league = parse_league(args.league.as_deref())?;
                let players = snapshot.players_for_team(&args.team, league)?;
                self.render(&players, || report::players(&players))
            }
            Command::States => {
                let regions = rated_regions();
                let rates: Vec<_> = regions
                    .iter()
                    .map(|&(code, name, rate)| StateRate { code, name, rate })
                    .collect();
                self.render(&rates, || report::states(&regions))
            }
            Command::Catalogue(args) => {
                let league = parse_league(Some(args.league.as_str()))?
                    .ok_or(InputError::Missing { field: "league" })?;
                let entries = teams(league);
                self.render(&entries, || report::team_catalogue(entries))
            }
        }
    }

    fn render<T: Serialize + ?Sized>(
        &self,
        value: &T,
        text: impl FnOnce() -> String,
    ) -> Result<String> {
        if self.json {
            let mut out = serde_json::to_string_pretty(value).context("failed to encode JSON")?;
            out.push('\n');
            Ok(out)
        } else {
            Ok(text())
        }
    }

    fn athlete(
        &self,
        args: &AthleteArgs,
        snapshot: &PlayerSnapshot,
    ) -> Result<CalculationRequest> {
        let fine = parse_money("fine", &args.fine)?;

        if let Some(name) = &args.player {
            return Ok(self.service.request_for_player(snapshot, name, fine)?);
        }

        let gross = args
            .gross
            .as_deref()
            .ok_or(InputError::Missing { field: "grossSalary" })?;
        let team = args
            .team
            .as_deref()
            .ok_or(InputError::Missing { field: "team" })?;

        Ok(CalculationRequest {
            gross_salary: parse_money("grossSalary", gross)?,
            fine,
            team: team.trim().to_string(),
            league: parse_league(args.league.as_deref())?,
        })
    }

    fn compare(
        &self,
        args: &CompareArgs,
        snapshot: &PlayerSnapshot,
    ) -> Result<String> {
        let worker = worker_profile(args)?;
        let outcome = self.service.compare(self.athlete(&args.athlete, snapshot)?, &worker);

        let output = ComparisonOutput {
            you: &worker,
            outcome: &outcome,
        };
        self.render(&output, || {
            format!(
                "Your income: {} in {}\n\n{}",
                report::income(&worker.income),
                worker.state,
                report::comparison(&outcome.comparison)
            )
        })
    }
}

fn worker_profile(args: &CompareArgs) -> Result<WorkerProfile, InputError> {
    let income = match (&args.salary, &args.wage, &args.hours) {
        (Some(salary), _, _) => WorkerIncome::Salary(parse_money("salary", salary)?),
        (None, Some(wage), Some(hours)) => {
            WorkerIncome::hourly(parse_money("wage", wage)?, parse_amount("hours", hours)?)?
        }
        (None, Some(_), None) => return Err(InputError::Missing { field: "hours" }),
        (None, None, _) => return Err(InputError::Missing { field: "salary" }),
    };

    Ok(WorkerProfile {
        income,
        state: parse_state(&args.state)?,
    })
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use fine_core::{League, PlayerRecord, SnapshotError};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fine-compare").chain(args.iter().copied()))
            .unwrap()
    }

    fn snapshot() -> PlayerSnapshot {
        PlayerSnapshot::new(
            vec![
                PlayerRecord {
                    name: "Stephen Curry".to_string(),
                    team: "GSW".to_string(),
                    gross_salary: dec!(50000000),
                    league: Some(League::Nba),
                },
                PlayerRecord {
                    name: "Aaron Judge".to_string(),
                    team: "NYY".to_string(),
                    gross_salary: dec!(40000000),
                    league: Some(League::Mlb),
                },
            ],
            None,
        )
    }

    fn run(
        args: &[&str],
        json: bool,
    ) -> Result<String> {
        let cli = cli(args);
        App::new(FineService::default(), json).execute(&cli.command, &snapshot())
    }

    // ===== Settings =====

    #[test]
    fn flags_override_config_file() {
        let mut config = AppConfig::default();
        config.logging.level = "warn".to_string();
        config.database.connection_string = "from-file.db".to_string();

        let settings = Settings::resolve(
            &cli(&["--db-backend", "FILE", "--log-file", "x.log", "states"]),
            config,
        );

        assert_eq!(settings.db.backend, "file");
        assert_eq!(settings.db.connection_string, "from-file.db");
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.log_file, Some(PathBuf::from("x.log")));
    }

    #[test]
    fn registry_knows_both_backends() {
        assert_eq!(build_registry().available_backends(), vec!["file", "sqlite"]);
    }

    #[tokio::test]
    async fn file_backend_loads_player_file() {
        let config = DbConfig {
            backend: "file".to_string(),
            connection_string: concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/players.json")
                .to_string(),
        };

        let snapshot = load_snapshot(&build_registry(), &config).await.unwrap();

        assert_eq!(snapshot.len(), 3);
        assert!(snapshot.refreshed_at().is_some());
    }

    #[tokio::test]
    async fn unknown_backend_fails_to_load() {
        let config = DbConfig {
            backend: "postgres".to_string(),
            connection_string: String::new(),
        };

        assert!(load_snapshot(&build_registry(), &config).await.is_err());
    }

    // ===== Commands =====

    #[test]
    fn snapshot_only_read_when_needed() {
        assert!(!cli(&["states"]).command.needs_snapshot());
        assert!(cli(&["teams"]).command.needs_snapshot());
        assert!(
            !cli(&["calculate", "--gross", "1", "--fine", "1", "--team", "GSW"])
                .command
                .needs_snapshot()
        );
        assert!(
            cli(&["calculate", "--player", "X", "--fine", "1"])
                .command
                .needs_snapshot()
        );
    }

    #[test]
    fn calculate_json_matches_wire_response() {
        let out = run(
            &["calculate", "--gross", "50m", "--fine", "25000", "--team", "GSW", "--league", "nba"],
            true,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let amount = |key: &str| value["deductions"][key].as_f64().unwrap();
        assert_eq!(amount("Net Income"), 16816812.25);
        assert_eq!(amount("State"), 6500000.0);
        assert!(value["finePercentage"].is_number());
    }

    #[test]
    fn calculate_for_snapshot_player() {
        let out = run(&["calculate", "--player", "stephen curry", "--fine", "25k"], false).unwrap();

        assert!(out.contains("Team: GSW (NBA)"));
        assert!(out.contains("$16,816,812.25"));
    }

    #[test]
    fn unknown_player_is_an_error() {
        let err = run(&["calculate", "--player", "Nobody", "--fine", "1"], false).unwrap_err();

        assert_eq!(
            err.downcast_ref::<SnapshotError>(),
            Some(&SnapshotError::PlayerNotFound("Nobody".to_string()))
        );
    }

    #[test]
    fn malformed_amount_is_an_input_error() {
        let err = run(&["calculate", "--gross", "lots", "--fine", "1", "--team", "GSW"], false)
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<InputError>(),
            Some(InputError::NotANumber { field: "grossSalary", .. })
        ));
    }

    #[test]
    fn unknown_league_is_an_input_error() {
        let err = run(
            &["calculate", "--gross", "1", "--fine", "1", "--team", "GSW", "--league", "XFL"],
            false,
        )
        .unwrap_err();

        assert_eq!(
            err.downcast_ref::<InputError>(),
            Some(&InputError::UnknownLeague("XFL".to_string()))
        );
    }

    #[test]
    fn compare_with_salary_in_text() {
        let out = run(
            &[
                "compare", "--gross", "50m", "--fine", "25000", "--team", "GSW", "--league",
                "NBA", "--salary", "60,000", "--state", "tx",
            ],
            false,
        )
        .unwrap();

        assert!(out.starts_with("Your income: $60,000.00 per year in TX"));
        assert!(out.contains("$51,747.00"));
        assert!(out.contains("Equivalent Fine"));
    }

    #[test]
    fn compare_json_carries_both_sides() {
        let out = run(
            &[
                "compare", "--player", "Stephen Curry", "--fine", "25000", "--wage", "25",
                "--hours", "40", "--state", "NY", "--json",
            ],
            true,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["region"]["kind"], "rated");
        assert_eq!(value["region"]["region"], "CA");
        let worker_gross: Decimal = value["worker"]["grossSalary"].as_str().unwrap().parse().unwrap();
        assert_eq!(worker_gross, dec!(52000));
        assert!(value["equivalentFine"].is_string());
        assert_eq!(value["you"]["state"], "NY");
    }

    #[test]
    fn compare_rejects_unknown_state() {
        let err = run(
            &[
                "compare", "--gross", "1", "--fine", "1", "--team", "GSW", "--salary", "1",
                "--state", "ON",
            ],
            false,
        )
        .unwrap_err();

        assert_eq!(
            err.downcast_ref::<InputError>(),
            Some(&InputError::UnknownState("ON".to_string()))
        );
    }

    #[test]
    fn compare_rejects_impossible_hours() {
        let err = run(
            &[
                "compare", "--gross", "1", "--fine", "1", "--team", "GSW", "--wage", "10",
                "--hours", "200", "--state", "TX",
            ],
            false,
        )
        .unwrap_err();

        assert_eq!(
            err.downcast_ref::<InputError>(),
            Some(&InputError::HoursOutOfRange(dec!(200)))
        );
    }

    #[test]
    fn teams_and_players_from_snapshot() {
        assert_eq!(run(&["teams"], false).unwrap(), "GSW\nNYY\n");
        assert_eq!(run(&["teams", "--league", "MLB"], false).unwrap(), "NYY\n");

        let players = run(&["players", "--team", "GSW"], true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&players).unwrap();
        assert_eq!(value[0]["name"], "Stephen Curry");
    }

    #[test]
    fn empty_snapshot_is_not_ready() {
        let cli = cli(&["teams"]);
        let err = App::new(FineService::default(), false)
            .execute(&cli.command, &PlayerSnapshot::default())
            .unwrap_err();

        assert_eq!(err.downcast_ref::<SnapshotError>(), Some(&SnapshotError::NotReady));
    }

    #[test]
    fn states_and_catalogue_need_no_snapshot() {
        let states = run(&["states"], false).unwrap();
        assert!(states.contains("California"));
        assert!(states.contains("13%"));

        let catalogue = run(&["catalogue", "--league", "nhl"], true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&catalogue).unwrap();
        assert!(
            value
                .as_array()
                .unwrap()
                .iter()
                .any(|t| t["abbreviation"] == "TOR" && t["region"] == "ON")
        );
    }
}
