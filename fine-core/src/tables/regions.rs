use std::collections::HashMap;
use std::sync::LazyLock;

use rust_decimal::Decimal;

use crate::JurisdictionCode;

/// (code, name, flat income tax rate as mantissa/scale).
///
/// Canadian provinces have names but no rate: provincial income tax is not
/// modeled and resolves to the default state rate.
const REGIONS: &[(&str, &str, Option<(i64, u32)>)] = &[
    ("AL", "Alabama", Some((5, 2))),
    ("AK", "Alaska", Some((0, 0))),
    ("AZ", "Arizona", Some((454, 4))),
    ("AR", "Arkansas", Some((65, 3))),
    ("CA", "California", Some((13, 2))),
    ("CO", "Colorado", Some((463, 4))),
    ("CT", "Connecticut", Some((6, 2))),
    ("DE", "Delaware", Some((66, 3))),
    ("DC", "District of Columbia", Some((85, 3))),
    ("FL", "Florida", Some((0, 0))),
    ("GA", "Georgia", Some((575, 4))),
    ("HI", "Hawaii", Some((825, 4))),
    ("ID", "Idaho", Some((625, 4))),
    ("IL", "Illinois", Some((495, 4))),
    ("IN", "Indiana", Some((323, 4))),
    ("IA", "Iowa", Some((853, 4))),
    ("KS", "Kansas", Some((57, 3))),
    ("KY", "Kentucky", Some((5, 2))),
    ("LA", "Louisiana", Some((6, 2))),
    ("ME", "Maine", Some((715, 4))),
    ("MD", "Maryland", Some((575, 4))),
    ("MA", "Massachusetts", Some((5, 2))),
    ("MI", "Michigan", Some((425, 4))),
    ("MN", "Minnesota", Some((985, 4))),
    ("MS", "Mississippi", Some((5, 2))),
    ("MO", "Missouri", Some((54, 3))),
    ("MT", "Montana", Some((675, 4))),
    ("NE", "Nebraska", Some((684, 4))),
    ("NV", "Nevada", Some((0, 0))),
    ("NH", "New Hampshire", Some((0, 0))),
    ("NJ", "New Jersey", Some((897, 4))),
    ("NM", "New Mexico", Some((49, 3))),
    ("NY", "New York", Some((685, 4))),
    ("NC", "North Carolina", Some((5499, 5))),
    ("ND", "North Dakota", Some((29, 3))),
    ("OH", "Ohio", Some((4997, 5))),
    ("OK", "Oklahoma", Some((5, 2))),
    ("OR", "Oregon", Some((99, 3))),
    ("PA", "Pennsylvania", Some((307, 4))),
    ("RI", "Rhode Island", Some((515, 4))),
    ("SC", "South Carolina", Some((7, 2))),
    ("SD", "South Dakota", Some((0, 0))),
    ("TN", "Tennessee", Some((0, 0))),
    ("TX", "Texas", Some((0, 0))),
    ("UT", "Utah", Some((495, 4))),
    ("VT", "Vermont", Some((895, 4))),
    ("VA", "Virginia", Some((575, 4))),
    ("WA", "Washington", Some((0, 0))),
    ("WV", "West Virginia", Some((65, 3))),
    ("WI", "Wisconsin", Some((765, 4))),
    ("WY", "Wyoming", Some((0, 0))),
    ("AB", "Alberta", None),
    ("BC", "British Columbia", None),
    ("MB", "Manitoba", None),
    ("ON", "Ontario", None),
    ("QC", "Quebec", None),
];

/// Regions whose rate is charged to athletes. A team elsewhere pays no state
/// tax even when its region has a rate for workers.
const TEAM_RATED: [&str; 22] = [
    "AZ", "CA", "CO", "DC", "FL", "GA", "IL", "IN", "LA", "MA", "MI", "MN", "NC", "NY", "OH", "OK",
    "OR", "PA", "TN", "TX", "UT", "WI",
];

static RATES: LazyLock<HashMap<&'static str, Decimal>> = LazyLock::new(|| {
    REGIONS
        .iter()
        .filter_map(|&(code, _, rate)| rate.map(|(num, scale)| (code, Decimal::new(num, scale))))
        .collect()
});

/// Looks up a region by code (case-insensitive).
pub fn jurisdiction(code: &str) -> Option<JurisdictionCode> {
    let code = code.trim();
    REGIONS
        .iter()
        .find(|(c, _, _)| c.eq_ignore_ascii_case(code))
        .map(|&(c, _, _)| JurisdictionCode::new(c))
}

/// Flat income tax rate for `code`, or `None` when the region has no entry.
pub fn state_tax_rate(code: JurisdictionCode) -> Option<Decimal> {
    RATES.get(code.as_str()).copied()
}

/// Rate charged to an athlete whose team plays in `code`.
///
/// A subset of [`state_tax_rate`]: regions outside the athlete table, such
/// as New Jersey or Maryland, have no team rate.
pub fn team_tax_rate(code: JurisdictionCode) -> Option<Decimal> {
    if TEAM_RATED.contains(&code.as_str()) {
        state_tax_rate(code)
    } else {
        None
    }
}

pub fn region_name(code: JurisdictionCode) -> Option<&'static str> {
    REGIONS
        .iter()
        .find(|(c, _, _)| *c == code.as_str())
        .map(|&(_, name, _)| name)
}

/// Every region that carries a rate, sorted by code.
pub fn rated_regions() -> Vec<(JurisdictionCode, &'static str, Decimal)> {
    let mut regions: Vec<_> = REGIONS
        .iter()
        .filter_map(|&(code, name, rate)| {
            rate.map(|(num, scale)| (JurisdictionCode::new(code), name, Decimal::new(num, scale)))
        })
        .collect();
    regions.sort_by_key(|(code, _, _)| *code);
    regions
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn rates_for_team_states() {
        let rate = |code| jurisdiction(code).and_then(state_tax_rate);

        assert_eq!(rate("CA"), Some(dec!(0.13)));
        assert_eq!(rate("NC"), Some(dec!(0.05499)));
        assert_eq!(rate("OH"), Some(dec!(0.04997)));
        assert_eq!(rate("DC"), Some(dec!(0.085)));
        assert_eq!(rate("TX"), Some(dec!(0)));
    }

    #[test]
    fn team_rates_are_a_subset() {
        let team_rate = |code| jurisdiction(code).and_then(team_tax_rate);

        assert_eq!(team_rate("CA"), Some(dec!(0.13)));
        assert_eq!(team_rate("DC"), Some(dec!(0.085)));
        assert_eq!(team_rate("NJ"), None);
        assert_eq!(team_rate("MD"), None);
        assert_eq!(team_rate("MO"), None);
        assert_eq!(team_rate("NV"), None);
        assert_eq!(team_rate("ON"), None);

        let team_rated = rated_regions()
            .into_iter()
            .filter(|(code, _, _)| team_tax_rate(*code).is_some())
            .count();
        assert_eq!(team_rated, TEAM_RATED.len());
    }

    #[test]
    fn provinces_resolve_without_rate() {
        let ontario = jurisdiction("ON").expect("Ontario is a known region");

        assert!(ontario.is_canadian_province());
        assert_eq!(state_tax_rate(ontario), None);
        assert_eq!(region_name(ontario), Some("Ontario"));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(jurisdiction(" ny "), Some(JurisdictionCode::new("NY")));
        assert_eq!(jurisdiction("ZZ"), None);
    }

    #[test]
    fn rated_regions_cover_states_and_dc() {
        let regions = rated_regions();

        assert_eq!(regions.len(), 51);
        assert_eq!(regions[0].0.as_str(), "AK");
        assert!(regions.iter().all(|(code, _, _)| !code.is_canadian_province()));
    }
}
