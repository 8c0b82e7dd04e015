//! Static MLB franchise table: abbreviation, full name, division and league.

use crate::error::{HanksTankError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Team {
    pub abbreviation: &'static str,
    pub name: &'static str,
    pub division: &'static str,
    pub league: &'static str,
}

const fn team(
    abbreviation: &'static str,
    name: &'static str,
    division: &'static str,
    league: &'static str,
) -> Team {
    Team {
        abbreviation,
        name,
        division,
        league,
    }
}

/// Divisions in display order.
pub const DIVISIONS: [&str; 6] = [
    "AL East",
    "AL Central",
    "AL West",
    "NL East",
    "NL Central",
    "NL West",
];

pub static MLB_TEAMS: [Team; 30] = [
    team("BAL", "Baltimore Orioles", "AL East", "AL"),
    team("BOS", "Boston Red Sox", "AL East", "AL"),
    team("NYY", "New York Yankees", "AL East", "AL"),
    team("TB", "Tampa Bay Rays", "AL East", "AL"),
    team("TOR", "Toronto Blue Jays", "AL East", "AL"),
    team("CWS", "Chicago White Sox", "AL Central", "AL"),
    team("CLE", "Cleveland Guardians", "AL Central", "AL"),
    team("DET", "Detroit Tigers", "AL Central", "AL"),
    team("KC", "Kansas City Royals", "AL Central", "AL"),
    team("MIN", "Minnesota Twins", "AL Central", "AL"),
    team("HOU", "Houston Astros", "AL West", "AL"),
    team("LAA", "Los Angeles Angels", "AL West", "AL"),
    team("OAK", "Oakland Athletics", "AL West", "AL"),
    team("SEA", "Seattle Mariners", "AL West", "AL"),
    team("TEX", "Texas Rangers", "AL West", "AL"),
    team("ATL", "Atlanta Braves", "NL East", "NL"),
    team("MIA", "Miami Marlins", "NL East", "NL"),
    team("NYM", "New York Mets", "NL East", "NL"),
    team("PHI", "Philadelphia Phillies", "NL East", "NL"),
    team("WSH", "Washington Nationals", "NL East", "NL"),
    team("CHC", "Chicago Cubs", "NL Central", "NL"),
    team("CIN", "Cincinnati Reds", "NL Central", "NL"),
    team("MIL", "Milwaukee Brewers", "NL Central", "NL"),
    team("PIT", "Pittsburgh Pirates", "NL Central", "NL"),
    team("STL", "St. Louis Cardinals", "NL Central", "NL"),
    team("ARI", "Arizona Diamondbacks", "NL West", "NL"),
    team("COL", "Colorado Rockies", "NL West", "NL"),
    team("LAD", "Los Angeles Dodgers", "NL West", "NL"),
    team("SD", "San Diego Padres", "NL West", "NL"),
    team("SF", "San Francisco Giants", "NL West", "NL"),
];

pub fn by_abbreviation(abbreviation: &str) -> Option<&'static Team> {
    MLB_TEAMS
        .iter()
        .find(|t| t.abbreviation.eq_ignore_ascii_case(abbreviation.trim()))
}

pub fn by_name(name: &str) -> Option<&'static Team> {
    MLB_TEAMS
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
}

/// Resolve an abbreviation or full name, as typed on the command line.
pub fn lookup(query: &str) -> Result<&'static Team> {
    by_abbreviation(query)
        .or_else(|| by_name(query))
        .ok_or_else(|| HanksTankError::TeamNotFound {
            name: query.to_string(),
        })
}

/// Abbreviation for a full team name; unknown names fall back to their
/// first three letters upper-cased.
pub fn abbreviation_for(name: &str) -> String {
    match by_name(name) {
        Some(team) => team.abbreviation.to_string(),
        None => name.chars().take(3).collect::<String>().to_uppercase(),
    }
}

pub fn division_of(name: &str) -> Option<&'static str> {
    by_name(name).map(|t| t.division)
}

/// True when a leaderboard `Team` cell (abbreviation or full name) is this team.
pub fn is_team_cell(team: &Team, cell: &str) -> bool {
    let cell = cell.trim();
    team.abbreviation.eq_ignore_ascii_case(cell) || team.name.eq_ignore_ascii_case(cell)
}
