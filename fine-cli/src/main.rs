use std::env;
use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use fine_cli::config::CONFIG_ENV;
use fine_cli::logging::init_logging;
use fine_cli::{App, AppConfig, Cli, Settings, build_registry, load_snapshot};
use fine_core::FineService;
use fine_core::calculations::FederalTaxSchedule;
use fine_data::BracketLoader;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = env::current_dir().context("cannot determine working directory")?;
    let (config, source) =
        AppConfig::discover(cli.config.as_deref(), env::var(CONFIG_ENV).ok(), &cwd)?;
    let settings = Settings::resolve(&cli, config);

    init_logging(&settings.log_level, settings.log_file.as_deref())?;
    debug!(?source, ?settings, "configuration resolved");

    let schedule = match &cli.brackets {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open: {}", path.display()))?;
            let schedule = BracketLoader::load(file)
                .with_context(|| format!("invalid bracket schedule: {}", path.display()))?;
            info!(brackets = schedule.brackets().len(), path = %path.display(), "loaded federal schedule");
            schedule
        }
        None => FederalTaxSchedule::single_filer(),
    };

    let snapshot = if cli.command.needs_snapshot() {
        load_snapshot(&build_registry(), &settings.db).await?
    } else {
        Arc::default()
    };

    let app = App::new(FineService::new(schedule), cli.json);
    let output = app.execute(&cli.command, &snapshot)?;
    print!("{output}");

    Ok(())
}
