use std::io::Read;

use fine_core::FederalBracket;
use fine_core::calculations::{FederalTaxSchedule, ScheduleError};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a federal bracket schedule.
#[derive(Debug, Error)]
pub enum BracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(#[from] ScheduleError),
}

impl From<csv::Error> for BracketLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a federal brackets CSV file.
///
/// - `rate`: the marginal rate as a fraction (e.g., 0.22 for 22%)
/// - `limit`: the upper income bound; empty for the top bracket
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub rate: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub limit: Option<Decimal>,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .replace(',', "")
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for federal bracket schedules from CSV files.
///
/// Rows must be in ascending order; the resulting schedule is validated
/// before it is handed out.
pub struct BracketLoader;

impl BracketLoader {
    /// Parse bracket records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse and validate a schedule in one step.
    pub fn load<R: Read>(reader: R) -> Result<FederalTaxSchedule, BracketLoaderError> {
        let brackets = Self::parse(reader)?
            .into_iter()
            .map(|record| FederalBracket::new(record.rate, record.limit))
            .collect();

        Ok(FederalTaxSchedule::new(brackets)?)
    }
}
