use serde::Serialize;

use crate::{JurisdictionCode, League};

/// A franchise and the region whose income tax applies to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamEntry {
    pub abbreviation: &'static str,
    pub name: &'static str,
    pub region: JurisdictionCode,
}

const fn team(
    abbreviation: &'static str,
    name: &'static str,
    region: &'static str,
) -> TeamEntry {
    TeamEntry {
        abbreviation,
        name,
        region: JurisdictionCode::new(region),
    }
}

const NBA: &[TeamEntry] = &[
    team("ATL", "Atlanta Hawks", "GA"),
    team("BOS", "Boston Celtics", "MA"),
    team("BRK", "Brooklyn Nets", "NY"),
    team("CHO", "Charlotte Hornets", "NC"),
    team("CHI", "Chicago Bulls", "IL"),
    team("CLE", "Cleveland Cavaliers", "OH"),
    team("DAL", "Dallas Mavericks", "TX"),
    team("DEN", "Denver Nuggets", "CO"),
    team("DET", "Detroit Pistons", "MI"),
    team("GSW", "Golden State Warriors", "CA"),
    team("HOU", "Houston Rockets", "TX"),
    team("IND", "Indiana Pacers", "IN"),
    team("LAC", "Los Angeles Clippers", "CA"),
    team("LAL", "Los Angeles Lakers", "CA"),
    team("MEM", "Memphis Grizzlies", "TN"),
    team("MIA", "Miami Heat", "FL"),
    team("MIL", "Milwaukee Bucks", "WI"),
    team("MIN", "Minnesota Timberwolves", "MN"),
    team("NOP", "New Orleans Pelicans", "LA"),
    team("NYK", "New York Knicks", "NY"),
    team("OKC", "Oklahoma City Thunder", "OK"),
    team("ORL", "Orlando Magic", "FL"),
    team("PHI", "Philadelphia 76ers", "PA"),
    team("PHO", "Phoenix Suns", "AZ"),
    team("POR", "Portland Trail Blazers", "OR"),
    team("SAC", "Sacramento Kings", "CA"),
    team("SAS", "San Antonio Spurs", "TX"),
    team("TOR", "Toronto Raptors", "ON"),
    team("UTA", "Utah Jazz", "UT"),
    team("WAS", "Washington Wizards", "DC"),
];

const NFL: &[TeamEntry] = &[
    team("ARI", "Arizona Cardinals", "AZ"),
    team("ATL", "Atlanta Falcons", "GA"),
    team("BAL", "Baltimore Ravens", "MD"),
    team("BUF", "Buffalo Bills", "NY"),
    team("CAR", "Carolina Panthers", "NC"),
    team("CHI", "Chicago Bears", "IL"),
    team("CIN", "Cincinnati Bengals", "OH"),
    team("CLE", "Cleveland Browns", "OH"),
    team("DAL", "Dallas Cowboys", "TX"),
    team("DEN", "Denver Broncos", "CO"),
    team("DET", "Detroit Lions", "MI"),
    team("GB", "Green Bay Packers", "WI"),
    team("HOU", "Houston Texans", "TX"),
    team("IND", "Indianapolis Colts", "IN"),
    team("JAX", "Jacksonville Jaguars", "FL"),
    team("KC", "Kansas City Chiefs", "MO"),
    team("LV", "Las Vegas Raiders", "NV"),
    team("LAC", "Los Angeles Chargers", "CA"),
    team("LAR", "Los Angeles Rams", "CA"),
    team("MIA", "Miami Dolphins", "FL"),
    team("MIN", "Minnesota Vikings", "MN"),
    team("NE", "New England Patriots", "MA"),
    team("NO", "New Orleans Saints", "LA"),
    team("NYG", "New York Giants", "NJ"),
    team("NYJ", "New York Jets", "NJ"),
    team("PHI", "Philadelphia Eagles", "PA"),
    team("PIT", "Pittsburgh Steelers", "PA"),
    team("SEA", "Seattle Seahawks", "WA"),
    team("SF", "San Francisco 49ers", "CA"),
    team("TB", "Tampa Bay Buccaneers", "FL"),
    team("TEN", "Tennessee Titans", "TN"),
    team("WAS", "Washington Commanders", "DC"),
];

const MLB: &[TeamEntry] = &[
    team("ARI", "Arizona Diamondbacks", "AZ"),
    team("ATL", "Atlanta Braves", "GA"),
    team("BAL", "Baltimore Orioles", "MD"),
    team("BOS", "Boston Red Sox", "MA"),
    team("CHC", "Chicago Cubs", "IL"),
    team("CHW", "Chicago White Sox", "IL"),
    team("CIN", "Cincinnati Reds", "OH"),
    team("CLE", "Cleveland Guardians", "OH"),
    team("COL", "Colorado Rockies", "CO"),
    team("DET", "Detroit Tigers", "MI"),
    team("HOU", "Houston Astros", "TX"),
    team("KC", "Kansas City Royals", "MO"),
    team("LAA", "Los Angeles Angels", "CA"),
    team("LAD", "Los Angeles Dodgers", "CA"),
    team("MIA", "Miami Marlins", "FL"),
    team("MIL", "Milwaukee Brewers", "WI"),
    team("MIN", "Minnesota Twins", "MN"),
    team("NYM", "New York Mets", "NY"),
    team("NYY", "New York Yankees", "NY"),
    team("OAK", "Oakland Athletics", "CA"),
    team("PHI", "Philadelphia Phillies", "PA"),
    team("PIT", "Pittsburgh Pirates", "PA"),
    team("SD", "San Diego Padres", "CA"),
    team("SF", "San Francisco Giants", "CA"),
    team("SEA", "Seattle Mariners", "WA"),
    team("STL", "St. Louis Cardinals", "MO"),
    team("TB", "Tampa Bay Rays", "FL"),
    team("TEX", "Texas Rangers", "TX"),
    team("TOR", "Toronto Blue Jays", "ON"),
    team("WSH", "Washington Nationals", "DC"),
];

const NHL: &[TeamEntry] = &[
    team("ANA", "Anaheim Ducks", "CA"),
    team("ARI", "Arizona Coyotes", "AZ"),
    team("BOS", "Boston Bruins", "MA"),
    team("BUF", "Buffalo Sabres", "NY"),
    team("CGY", "Calgary Flames", "AB"),
    team("CAR", "Carolina Hurricanes", "NC"),
    team("CHI", "Chicago Blackhawks", "IL"),
    team("COL", "Colorado Avalanche", "CO"),
    team("CBJ", "Columbus Blue Jackets", "OH"),
    team("DAL", "Dallas Stars", "TX"),
    team("DET", "Detroit Red Wings", "MI"),
    team("EDM", "Edmonton Oilers", "AB"),
    team("FLA", "Florida Panthers", "FL"),
    team("LAK", "Los Angeles Kings", "CA"),
    team("MIN", "Minnesota Wild", "MN"),
    team("MTL", "Montreal Canadiens", "QC"),
    team("NSH", "Nashville Predators", "TN"),
    team("NJD", "New Jersey Devils", "NJ"),
    team("NYI", "New York Islanders", "NY"),
    team("NYR", "New York Rangers", "NY"),
    team("OTT", "Ottawa Senators", "ON"),
    team("PHI", "Philadelphia Flyers", "PA"),
    team("PIT", "Pittsburgh Penguins", "PA"),
    team("SJS", "San Jose Sharks", "CA"),
    team("SEA", "Seattle Kraken", "WA"),
    team("STL", "St. Louis Blues", "MO"),
    team("TBL", "Tampa Bay Lightning", "FL"),
    team("TOR", "Toronto Maple Leafs", "ON"),
    team("VAN", "Vancouver Canucks", "BC"),
    team("VGK", "Vegas Golden Knights", "NV"),
    team("WSH", "Washington Capitals", "DC"),
    team("WPG", "Winnipeg Jets", "MB"),
];

const WNBA: &[TeamEntry] = &[
    team("ATL", "Atlanta Dream", "GA"),
    team("CHI", "Chicago Sky", "IL"),
    team("CON", "Connecticut Sun", "CT"),
    team("DAL", "Dallas Wings", "TX"),
    team("IND", "Indiana Fever", "IN"),
    team("LAS", "Las Vegas Aces", "NV"),
    team("LVA", "Los Angeles Sparks", "CA"),
    team("MIN", "Minnesota Lynx", "MN"),
    team("NYL", "New York Liberty", "NY"),
    team("PHX", "Phoenix Mercury", "AZ"),
    team("SEA", "Seattle Storm", "WA"),
    team("WAS", "Washington Mystics", "DC"),
];

/// All teams of `league`, in table order.
pub fn teams(league: League) -> &'static [TeamEntry] {
    match league {
        League::Nba => NBA,
        League::Nfl => NFL,
        League::Mlb => MLB,
        League::Nhl => NHL,
        League::Wnba => WNBA,
    }
}

/// Finds a team by abbreviation first, then by full name. Both comparisons
/// ignore ASCII case.
///
/// With a league the search is confined to that league's table, so a reused
/// abbreviation such as `ATL` always resolves to the requested league's
/// franchise. Without one, every league is searched in [`League::ALL`] order
/// and the first abbreviation match wins before any full name is tried.
pub fn find_team(
    identifier: &str,
    league: Option<League>,
) -> Option<(League, &'static TeamEntry)> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return None;
    }

    let scope: &[League] = match league {
        Some(ref league) => std::slice::from_ref(league),
        None => &League::ALL,
    };

    let by_abbreviation = scope.iter().find_map(|&league| {
        teams(league)
            .iter()
            .find(|t| t.abbreviation.eq_ignore_ascii_case(identifier))
            .map(|t| (league, t))
    });

    by_abbreviation.or_else(|| {
        scope.iter().find_map(|&league| {
            teams(league)
                .iter()
                .find(|t| t.name.eq_ignore_ascii_case(identifier))
                .map(|t| (league, t))
        })
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn league_table_sizes() {
        assert_eq!(teams(League::Nba).len(), 30);
        assert_eq!(teams(League::Nfl).len(), 32);
        assert_eq!(teams(League::Mlb).len(), 30);
        assert_eq!(teams(League::Nhl).len(), 32);
        assert_eq!(teams(League::Wnba).len(), 12);
    }

    #[test]
    fn abbreviations_unique_within_each_league() {
        for league in League::ALL {
            let mut codes: Vec<_> = teams(league).iter().map(|t| t.abbreviation).collect();
            codes.sort_unstable();
            codes.dedup();
            assert_eq!(codes.len(), teams(league).len(), "duplicate code in {league}");
        }
    }

    #[test]
    fn scoped_lookup_picks_requested_league() {
        let (league, entry) = find_team("ATL", Some(League::Wnba)).expect("ATL is a WNBA team");

        assert_eq!(league, League::Wnba);
        assert_eq!(entry.name, "Atlanta Dream");
    }

    #[test]
    fn scoped_lookup_does_not_leak_across_leagues() {
        // GSW exists only in the basketball table.
        assert!(find_team("GSW", Some(League::Nfl)).is_none());
        assert!(find_team("GSW", Some(League::Nba)).is_some());
    }

    #[test]
    fn unscoped_lookup_takes_first_league_in_order() {
        let (league, entry) = find_team("PHI", None).expect("PHI is known");

        assert_eq!(league, League::Nba);
        assert_eq!(entry.name, "Philadelphia 76ers");
    }

    #[test]
    fn unscoped_lookup_reaches_later_leagues() {
        let (league, entry) = find_team("LAS", None).expect("LAS is known");

        assert_eq!(league, League::Wnba);
        assert_eq!(entry.name, "Las Vegas Aces");
        assert_eq!(entry.region.as_str(), "NV");
    }

    #[test]
    fn wnba_las_is_vegas_and_lva_is_los_angeles() {
        let (_, aces) = find_team("LAS", Some(League::Wnba)).expect("LAS is known");
        let (_, sparks) = find_team("LVA", Some(League::Wnba)).expect("LVA is known");

        assert_eq!(aces.region.as_str(), "NV");
        assert_eq!(sparks.name, "Los Angeles Sparks");
        assert_eq!(sparks.region.as_str(), "CA");
        assert_eq!(find_team("Las Vegas Aces", None).map(|(_, t)| t.abbreviation), Some("LAS"));
    }

    #[test]
    fn full_name_lookup_ignores_case() {
        let (league, entry) =
            find_team("toronto maple leafs", None).expect("full names resolve");

        assert_eq!(league, League::Nhl);
        assert_eq!(entry.region.as_str(), "ON");
    }

    #[test]
    fn blank_identifier_is_not_found() {
        assert!(find_team("   ", None).is_none());
    }
}
