mod deduction;
mod federal_bracket;
mod jurisdiction;
mod league;
mod player;

pub use deduction::{
    DeductionBreakdown, DeductionKind, DeductionRates, LeagueDeductionRates, NET_INCOME_KEY,
};
pub use federal_bracket::FederalBracket;
pub use jurisdiction::JurisdictionCode;
pub use league::League;
pub use player::PlayerRecord;
