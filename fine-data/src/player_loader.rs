use std::io::Read;
use std::path::Path;

use fine_core::request::{RawAmount, parse_league};
use fine_core::{InputError, PlayerRecord, PlayerRepository, RepositoryError};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Errors that can occur when loading a player snapshot.
#[derive(Debug, Error)]
pub enum PlayerLoaderError {
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Unsupported player file '{0}' (expected .json or .csv)")]
    UnsupportedFormat(String),

    #[error("Invalid player record {index} ({name:?}): {source}")]
    InvalidRecord {
        index: usize,
        name: String,
        source: InputError,
    },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for PlayerLoaderError {
    fn from(err: csv::Error) -> Self {
        PlayerLoaderError::CsvParse(err.to_string())
    }
}

impl From<serde_json::Error> for PlayerLoaderError {
    fn from(err: serde_json::Error) -> Self {
        PlayerLoaderError::JsonParse(err.to_string())
    }
}

/// Supported snapshot encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerFormat {
    Json,
    Csv,
}

impl PlayerFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, PlayerLoaderError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(Self::Csv),
            _ => Err(PlayerLoaderError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }
}

/// A player as the salary scraper emits it.
///
/// Salaries arrive either as numbers or as display strings such as
/// `"$45,640,084"`. Columns in CSV files use the same camelCase names:
/// `name,team,grossSalary,league`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRow {
    pub name: String,
    pub team: String,
    pub gross_salary: RawAmount,
    #[serde(default)]
    pub league: Option<String>,
}

impl PlayerRow {
    pub fn into_record(self) -> Result<PlayerRecord, InputError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(InputError::Missing { field: "name" });
        }
        let team = self.team.trim();
        if team.is_empty() {
            return Err(InputError::Missing { field: "team" });
        }

        let gross_salary = match self.gross_salary {
            RawAmount::Text(text) => RawAmount::Text(strip_currency(&text)),
            number => number,
        }
        .into_amount("grossSalary")?;

        Ok(PlayerRecord {
            name: name.to_string(),
            team: team.to_string(),
            gross_salary,
            league: parse_league(self.league.as_deref())?,
        })
    }
}

fn strip_currency(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect()
}

/// Reads scraped player lists and stores them as the current snapshot.
pub struct PlayerLoader;

impl PlayerLoader {
    /// Parse a JSON array of player rows.
    pub fn parse_json<R: Read>(reader: R) -> Result<Vec<PlayerRow>, PlayerLoaderError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Parse player rows from CSV with a header line.
    pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<PlayerRow>, PlayerLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut rows = Vec::new();

        for result in csv_reader.deserialize() {
            let row: PlayerRow = result?;
            rows.push(row);
        }

        Ok(rows)
    }

    pub fn parse<R: Read>(
        reader: R,
        format: PlayerFormat,
    ) -> Result<Vec<PlayerRow>, PlayerLoaderError> {
        match format {
            PlayerFormat::Json => Self::parse_json(reader),
            PlayerFormat::Csv => Self::parse_csv(reader),
        }
    }

    /// Validate every row. The first bad row aborts the whole batch so a
    /// half-valid scrape never replaces a good snapshot.
    pub fn validate(rows: Vec<PlayerRow>) -> Result<Vec<PlayerRecord>, PlayerLoaderError> {
        rows.into_iter()
            .enumerate()
            .map(|(index, row)| {
                let name = row.name.clone();
                row.into_record()
                    .map_err(|source| PlayerLoaderError::InvalidRecord {
                        index,
                        name,
                        source,
                    })
            })
            .collect()
    }

    /// Replace the stored snapshot with `records`.
    pub async fn load<R: PlayerRepository + ?Sized>(
        repo: &R,
        records: &[PlayerRecord],
    ) -> Result<usize, PlayerLoaderError> {
        repo.replace_players(records).await?;
        info!(players = records.len(), "player snapshot stored");
        Ok(records.len())
    }
}
