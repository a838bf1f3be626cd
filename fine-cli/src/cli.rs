use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Compare an athlete's fine to what it would cost you.
#[derive(Parser, Debug, Clone)]
#[command(name = "fine-compare")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage backend holding the player snapshot (file, sqlite)
    #[arg(long, global = true)]
    pub db_backend: Option<String>,

    /// Backend connection string, e.g. players.db
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Log filter directive, e.g. debug or fine_core=trace
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append log records to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Federal bracket schedule to use instead of the built-in one (CSV)
    #[arg(long, global = true)]
    pub brackets: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Deductions, net income and fine percentage for an athlete
    Calculate(AthleteArgs),

    /// Translate an athlete's fine to your own income
    Compare(CompareArgs),

    /// Teams present in the player snapshot
    Teams(LeagueFilter),

    /// Players on one team
    Players(PlayersArgs),

    /// State income tax rates available for the comparison
    States,

    /// Every franchise of a league with its tax region
    Catalogue(CatalogueArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AthleteArgs {
    /// The fine, e.g. 25000 or 25k
    #[arg(long)]
    pub fine: String,

    /// Look the athlete up in the player snapshot
    #[arg(long, conflicts_with_all = ["gross", "team"])]
    pub player: Option<String>,

    /// Annual gross salary, e.g. 45,640,084 or 45.6m
    #[arg(long, required_unless_present = "player")]
    pub gross: Option<String>,

    /// Team abbreviation or full name
    #[arg(long, required_unless_present = "player")]
    pub team: Option<String>,

    /// NBA, NFL, MLB, NHL or WNBA
    #[arg(long, conflicts_with = "player")]
    pub league: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub athlete: AthleteArgs,

    /// Your annual salary
    #[arg(long, conflicts_with_all = ["wage", "hours"], required_unless_present = "wage")]
    pub salary: Option<String>,

    /// Your hourly wage
    #[arg(long, requires = "hours")]
    pub wage: Option<String>,

    /// Hours you work per week
    #[arg(long, requires = "wage")]
    pub hours: Option<String>,

    /// Two-letter code of the state you live in
    #[arg(long)]
    pub state: String,
}

#[derive(Args, Debug, Clone)]
pub struct LeagueFilter {
    #[arg(long)]
    pub league: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct PlayersArgs {
    /// Team identifier as stored in the snapshot
    #[arg(long)]
    pub team: String,

    #[arg(long)]
    pub league: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CatalogueArgs {
    #[arg(long)]
    pub league: String,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn calculate_with_explicit_salary() {
        let cli = Cli::try_parse_from([
            "fine-compare",
            "calculate",
            "--gross",
            "50m",
            "--fine",
            "25k",
            "--team",
            "GSW",
            "--league",
            "NBA",
        ])
        .unwrap();

        let Command::Calculate(args) = cli.command else {
            panic!("expected calculate");
        };
        assert_eq!(args.gross.as_deref(), Some("50m"));
        assert_eq!(args.team.as_deref(), Some("GSW"));
        assert_eq!(args.player, None);
    }

    #[test]
    fn calculate_needs_salary_or_player() {
        let result = Cli::try_parse_from(["fine-compare", "calculate", "--fine", "100"]);

        assert!(result.is_err());
    }

    #[test]
    fn player_excludes_salary() {
        let result = Cli::try_parse_from([
            "fine-compare",
            "calculate",
            "--fine",
            "100",
            "--player",
            "Stephen Curry",
            "--gross",
            "1",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn compare_with_hourly_wage_and_global_flags() {
        let cli = Cli::try_parse_from([
            "fine-compare",
            "compare",
            "--player",
            "Stephen Curry",
            "--fine",
            "25000",
            "--wage",
            "25",
            "--hours",
            "40",
            "--state",
            "TX",
            "--json",
            "--db-backend",
            "file",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.db_backend.as_deref(), Some("file"));
        let Command::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.wage.as_deref(), Some("25"));
        assert_eq!(args.salary, None);
    }

    #[test]
    fn wage_requires_hours() {
        let result = Cli::try_parse_from([
            "fine-compare",
            "compare",
            "--player",
            "X",
            "--fine",
            "1",
            "--wage",
            "25",
            "--state",
            "TX",
        ]);

        assert!(result.is_err());
    }
}
