//! Boundary validation for calculation requests.
//!
//! Everything that reaches the engine has passed through here: amounts are
//! parsed into non-negative decimals, leagues and states are checked against
//! the static tables. Team identifiers are never rejected; an unknown team
//! falls back to the default state rate inside the resolver.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::tables::{jurisdiction, state_tax_rate};
use crate::{DeductionBreakdown, JurisdictionCode, League};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: Decimal },

    #[error("unknown league {0:?}; expected one of NBA, NFL, MLB, NHL, WNBA")]
    UnknownLeague(String),

    #[error("unknown state {0:?}")]
    UnknownState(String),

    #[error("{field} is too large")]
    AmountTooLarge { field: &'static str },

    #[error("hours per week must be between 0 and 168, got {0}")]
    HoursOutOfRange(Decimal),
}

/// Parses a non-negative amount from text.
///
/// Accepts plain and scientific notation after trimming whitespace.
pub fn parse_amount(
    field: &'static str,
    raw: &str,
) -> Result<Decimal, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Missing { field });
    }

    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| InputError::NotANumber {
            field,
            value: raw.to_string(),
        })?;

    non_negative(field, value)
}

/// Converts a JSON-style float into a non-negative amount.
pub fn amount_from_f64(
    field: &'static str,
    value: f64,
) -> Result<Decimal, InputError> {
    if !value.is_finite() {
        return Err(InputError::NonFinite { field });
    }
    let value = Decimal::from_f64(value).ok_or(InputError::NonFinite { field })?;
    non_negative(field, value)
}

fn non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, InputError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(InputError::Negative { field, value });
    }
    Ok(value)
}

/// Parses an optional league code; blank means "no league".
pub fn parse_league(raw: Option<&str>) -> Result<Option<League>, InputError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(code) => League::parse(code)
            .map(Some)
            .ok_or_else(|| InputError::UnknownLeague(code.to_string())),
    }
}

/// Parses a worker's state. Only regions with a modeled rate are accepted.
pub fn parse_state(raw: &str) -> Result<JurisdictionCode, InputError> {
    jurisdiction(raw)
        .filter(|code| state_tax_rate(*code).is_some())
        .ok_or_else(|| InputError::UnknownState(raw.trim().to_string()))
}

/// An amount as it arrives on the wire: a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    pub fn into_amount(
        self,
        field: &'static str,
    ) -> Result<Decimal, InputError> {
        match self {
            Self::Number(value) => amount_from_f64(field, value),
            Self::Text(text) => parse_amount(field, &text),
        }
    }
}

/// The unvalidated `{grossSalary, fine, team, league}` payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCalculationRequest {
    pub gross_salary: Option<RawAmount>,
    pub fine: Option<RawAmount>,
    #[serde(default)]
    pub team: String,
    pub league: Option<String>,
}

impl RawCalculationRequest {
    pub fn validate(self) -> Result<CalculationRequest, InputError> {
        let gross_salary = required(self.gross_salary, "grossSalary")?;
        let fine = required(self.fine, "fine")?;
        let league = parse_league(self.league.as_deref())?;

        Ok(CalculationRequest {
            gross_salary,
            fine,
            team: self.team.trim().to_string(),
            league,
        })
    }
}

fn required(
    raw: Option<RawAmount>,
    field: &'static str,
) -> Result<Decimal, InputError> {
    raw.ok_or(InputError::Missing { field })?.into_amount(field)
}

/// A validated athlete calculation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    pub gross_salary: Decimal,
    pub fine: Decimal,
    pub team: String,
    pub league: Option<League>,
}

/// `{deductions, finePercentage}` as returned to clients. Amounts go out as
/// JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    #[serde(serialize_with = "amounts_as_numbers")]
    pub deductions: BTreeMap<String, Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub fine_percentage: Decimal,
}

struct Number(Decimal);

impl Serialize for Number {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

fn amounts_as_numbers<S: Serializer>(
    amounts: &BTreeMap<String, Decimal>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(amounts.len()))?;
    for (label, amount) in amounts {
        map.serialize_entry(label, &Number(*amount))?;
    }
    map.end()
}

impl CalculationResponse {
    pub fn new(
        breakdown: &DeductionBreakdown,
        fine_percentage: Decimal,
    ) -> Self {
        Self {
            deductions: breakdown.to_map(),
            fine_percentage,
        }
    }
}
