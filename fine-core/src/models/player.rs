use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::League;

/// A player row as supplied by the salary scraper.
///
/// The league is optional because older snapshots were scraped from a
/// single-league source and never carried it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub name: String,
    pub team: String,
    pub gross_salary: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub league: Option<League>,
}

impl PlayerRecord {
    /// True when the record belongs to `league`, or when no filter is given.
    pub fn in_league(
        &self,
        league: Option<League>,
    ) -> bool {
        match league {
            Some(league) => self.league == Some(league),
            None => true,
        }
    }
}
