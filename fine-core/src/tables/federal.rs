use rust_decimal::Decimal;

use crate::FederalBracket;

/// (rate in percent, upper limit) for single filers; the top bracket is open.
const SINGLE_FILER: [(i64, Option<i64>); 7] = [
    (10, Some(11_600)),
    (12, Some(47_150)),
    (22, Some(100_525)),
    (24, Some(191_950)),
    (32, Some(243_725)),
    (35, Some(609_350)),
    (37, None),
];

/// Single-filer federal income tax brackets used for every calculation.
pub fn single_filer_brackets() -> Vec<FederalBracket> {
    SINGLE_FILER
        .iter()
        .map(|&(percent, limit)| {
            FederalBracket::new(Decimal::new(percent, 2), limit.map(Decimal::from))
        })
        .collect()
}
