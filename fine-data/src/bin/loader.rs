use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fine_core::PlayerRepository;
use fine_data::{PlayerFormat, PlayerLoader};
use fine_db_sqlite::SqliteRepository;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Load a scraped player snapshot into the database.
///
/// The file may be JSON (an array of `{name, team, grossSalary, league}`
/// objects) or CSV with the header `name,team,grossSalary,league`. The
/// stored snapshot is replaced as a whole.
#[derive(Parser, Debug)]
#[command(name = "fine-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the player snapshot (.json or .csv)
    #[arg(short, long)]
    file: PathBuf,

    /// SQLite database URL (e.g., sqlite:players.db?mode=rwc to create if missing)
    #[arg(short, long, default_value = "sqlite:players.db?mode=rwc")]
    database: String,

    /// Run database migrations before loading data
    #[arg(short, long, default_value_t = false)]
    migrate: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let format = PlayerFormat::from_path(&args.file)?;

    let repo = SqliteRepository::new(&args.database)
        .await
        .with_context(|| format!("Failed to connect to database: {}", args.database))?;

    if args.migrate {
        info!("running migrations");
        repo.run_migrations()
            .await
            .context("Failed to run migrations")?;
    }

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let rows = PlayerLoader::parse(file, format)
        .with_context(|| format!("Failed to parse: {}", args.file.display()))?;
    info!(rows = rows.len(), "parsed player rows");

    let records = PlayerLoader::validate(rows).context("Player snapshot failed validation")?;

    PlayerLoader::load(&repo, &records)
        .await
        .context("Failed to store player snapshot")?;
    let stored = repo
        .count_players()
        .await
        .context("Failed to count stored players")?;

    println!("Successfully loaded {stored} players into the database.");

    Ok(())
}
