use std::fmt;

use serde::{Deserialize, Serialize};

/// Professional leagues covered by the team tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum League {
    Nba,
    Nfl,
    Mlb,
    Nhl,
    Wnba,
}

impl League {
    /// Every league, in table declaration order.
    pub const ALL: [League; 5] = [
        League::Nba,
        League::Nfl,
        League::Mlb,
        League::Nhl,
        League::Wnba,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nba => "NBA",
            Self::Nfl => "NFL",
            Self::Mlb => "MLB",
            Self::Nhl => "NHL",
            Self::Wnba => "WNBA",
        }
    }

    /// Parses a league code, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|league| league.as_str().eq_ignore_ascii_case(s))
    }

    /// Basketball and football contracts carry escrow, jock tax and
    /// FICA Medicare on top of income tax.
    pub fn has_union_deductions(&self) -> bool {
        matches!(self, Self::Nba | Self::Nfl)
    }
}

impl fmt::Display for League {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.pad(self.as_str())
    }
}
