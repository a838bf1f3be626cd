use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One step of a progressive schedule.
///
/// `limit` is the upper income bound of the bracket; `None` marks the top,
/// unbounded bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederalBracket {
    pub rate: Decimal,
    pub limit: Option<Decimal>,
}

impl FederalBracket {
    pub fn new(
        rate: Decimal,
        limit: Option<Decimal>,
    ) -> Self {
        Self { rate, limit }
    }
}
