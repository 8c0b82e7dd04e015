//! Typed records for backend and MLB Stats API payloads.
//!
//! Backend leaderboards send numbers as numbers, numeric strings (`"0.300"`)
//! or `null` depending on the column. Every numeric field here goes through
//! [`de_lenient_f64`] so a bad cell degrades to `0.0` instead of failing the
//! whole response.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{HanksTankError, Result};

#[cfg(test)]
mod tests;

/// Read a JSON cell as a number: numbers as-is, numeric strings parsed
/// (a trailing `%` is ignored), anything else `None`.
pub fn value_as_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn de_lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(value_as_f64(&raw).unwrap_or(0.0))
}

fn de_lenient_id<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn de_lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Backend responses come either bare or wrapped as `{ success, data }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped {
        #[serde(default)]
        success: Option<bool>,
        data: T,
    },
    Bare(T),
}

impl<T> Envelope<T> {
    /// Unwrap the payload. An explicit `success: false` means the backend had nothing.
    pub fn into_data(self) -> Result<T> {
        match self {
            Self::Wrapped {
                success: Some(false),
                ..
            } => Err(HanksTankError::NoData),
            Self::Wrapped { data, .. } | Self::Bare(data) => Ok(data),
        }
    }
}

/// A leaderboard row addressable by its backend column names.
pub trait StatRecord {
    fn name(&self) -> &str;
    fn team(&self) -> &str;
    fn player_id(&self) -> Option<u64>;

    /// Value of a column by backend key (`"OPS"`, `"K/9"`, ...).
    fn stat(&self, key: &str) -> Option<f64>;

    /// Overwrite or add a column.
    fn set_stat(&mut self, key: &str, value: f64);

    /// Every numeric column this record carries.
    fn numeric_stats(&self) -> BTreeMap<String, f64>;

    /// Player name for player rows, team name for team rows.
    fn label(&self) -> &str {
        if self.name().is_empty() {
            self.team()
        } else {
            self.name()
        }
    }

    fn stat_or_zero(&self, key: &str) -> f64 {
        self.stat(key).unwrap_or(0.0)
    }

    /// A column is present and non-zero.
    fn has_stat(&self, key: &str) -> bool {
        self.stat(key).is_some_and(|v| v != 0.0)
    }
}

/// Generates a stat line struct whose fields are addressable by column key.
macro_rules! stat_line {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[doc = $doc:literal])* $key:literal => $field:ident, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
        pub struct $name {
            $(
                $(#[doc = $doc])*
                #[serde(rename = $key, default, deserialize_with = "de_lenient_f64")]
                pub $field: f64,
            )+
        }

        impl $name {
            pub const KEYS: &'static [&'static str] = &[$($key),+];

            pub fn get(&self, key: &str) -> Option<f64> {
                match key {
                    $($key => Some(self.$field),)+
                    _ => None,
                }
            }

            pub fn get_mut(&mut self, key: &str) -> Option<&mut f64> {
                match key {
                    $($key => Some(&mut self.$field),)+
                    _ => None,
                }
            }

            pub fn entries(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
                Self::KEYS.iter().filter_map(move |k| self.get(k).map(|v| (*k, v)))
            }
        }
    };
}

stat_line! {
    /// Counting and slash-line columns of a batting row.
    pub struct BattingLine {
        "G" => games,
        "AB" => at_bats,
        "PA" => plate_appearances,
        "R" => runs,
        "H" => hits,
        "2B" => doubles,
        "3B" => triples,
        "HR" => home_runs,
        "RBI" => rbi,
        "SB" => stolen_bases,
        "CS" => caught_stealing,
        "BB" => walks,
        "SO" => strikeouts,
        "HBP" => hit_by_pitch,
        "SF" => sac_flies,
        "SH" => sac_hits,
        "TB" => total_bases,
        "AVG" => avg,
        "OBP" => obp,
        "SLG" => slg,
        "OPS" => ops,
    }
}

stat_line! {
    /// Core columns of a pitching row.
    pub struct PitchingLine {
        "W" => wins,
        "L" => losses,
        "ERA" => era,
        "G" => games,
        "GS" => games_started,
        "CG" => complete_games,
        "SHO" => shutouts,
        "SV" => saves,
        /// Innings pitched in baseball notation (`180.1` is 180 and one out).
        "IP" => innings_pitched,
        "H" => hits,
        "R" => runs,
        "ER" => earned_runs,
        "HR" => home_runs,
        "BB" => walks,
        "SO" => strikeouts,
        "BF" => batters_faced,
        "WHIP" => whip,
    }
}

macro_rules! stat_record {
    ($(#[$meta:meta])* $name:ident, $line:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
        pub struct $name {
            #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
            pub name: Option<String>,
            #[serde(
                rename = "Team",
                alias = "Tm",
                default,
                skip_serializing_if = "Option::is_none"
            )]
            pub team: Option<String>,
            #[serde(
                rename = "IDfg",
                alias = "playerId",
                default,
                deserialize_with = "de_lenient_id",
                skip_serializing_if = "Option::is_none"
            )]
            pub player_id: Option<u64>,
            #[serde(flatten)]
            pub line: $line,
            /// Every other column the backend returned.
            #[serde(flatten)]
            pub extra: BTreeMap<String, Value>,
        }

        impl StatRecord for $name {
            fn name(&self) -> &str {
                self.name.as_deref().unwrap_or_default()
            }

            fn team(&self) -> &str {
                self.team.as_deref().unwrap_or_default()
            }

            fn player_id(&self) -> Option<u64> {
                self.player_id
            }

            fn stat(&self, key: &str) -> Option<f64> {
                self.line
                    .get(key)
                    .or_else(|| self.extra.get(key).and_then(value_as_f64))
            }

            fn set_stat(&mut self, key: &str, value: f64) {
                match self.line.get_mut(key) {
                    Some(slot) => *slot = value,
                    None => {
                        self.extra.insert(key.to_string(), Value::from(value));
                    }
                }
            }

            fn numeric_stats(&self) -> BTreeMap<String, f64> {
                let mut stats: BTreeMap<String, f64> = self
                    .extra
                    .iter()
                    .filter_map(|(k, v)| value_as_f64(v).map(|n| (k.clone(), n)))
                    .collect();
                stats.extend(self.line.entries().map(|(k, v)| (k.to_string(), v)));
                stats
            }
        }
    };
}

stat_record!(
    /// One row of `/team-batting` or `/player-batting`.
    BattingRecord,
    BattingLine
);

stat_record!(
    /// One row of `/team-pitching` or `/player-pitching`.
    PitchingRecord,
    PitchingLine
);

// Standings

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NamedRef {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StandingsResponse {
    #[serde(default)]
    pub records: Vec<DivisionStandings>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DivisionStandings {
    #[serde(rename = "teamRecords", default)]
    pub team_records: Vec<TeamRecord>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TeamRecord {
    pub team: NamedRef,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub wins: f64,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub losses: f64,
    #[serde(rename = "winningPercentage", default, deserialize_with = "de_lenient_string")]
    pub winning_percentage: String,
    #[serde(rename = "gamesBack", default, deserialize_with = "de_lenient_string")]
    pub games_back: String,
    #[serde(rename = "divisionRank", default, deserialize_with = "de_lenient_string")]
    pub division_rank: String,
}

// News

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NewsResponse {
    #[serde(default)]
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Article {
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub url: String,
    #[serde(rename = "urlToImage", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub source: Option<NamedRef>,
    #[serde(rename = "publishedAt", default, deserialize_with = "de_lenient_string")]
    pub published_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Article {
    /// Publication time, when the backend sent a parseable RFC 3339 stamp.
    pub fn published(&self) -> Option<chrono::DateTime<chrono::FixedOffset>> {
        chrono::DateTime::parse_from_rfc3339(&self.published_at).ok()
    }
}

// Transactions

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Person {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(rename = "fullName", default, deserialize_with = "de_lenient_string")]
    pub full_name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Transaction {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub person: Person,
    #[serde(rename = "fromTeam", default, skip_serializing_if = "Option::is_none")]
    pub from_team: Option<NamedRef>,
    #[serde(rename = "toTeam", default, skip_serializing_if = "Option::is_none")]
    pub to_team: Option<NamedRef>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub date: String,
    #[serde(rename = "typeDesc", default, deserialize_with = "de_lenient_string")]
    pub type_desc: String,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// Teams

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TeamInfo {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

// Statcast

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StatcastPitch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch_type: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub release_speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p_throws: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stand: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

// MLB Stats API schedule

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub dates: Vec<ScheduleDate>,
}

impl ScheduleResponse {
    pub fn into_games(self) -> Vec<GameSummary> {
        self.dates.into_iter().flat_map(|d| d.games).collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScheduleDate {
    #[serde(default)]
    pub games: Vec<GameSummary>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GameStatus {
    #[serde(rename = "statusCode", default, deserialize_with = "de_lenient_string")]
    pub status_code: String,
    #[serde(rename = "detailedState", default, deserialize_with = "de_lenient_string")]
    pub detailed_state: String,
    #[serde(rename = "abstractGameState", default, deserialize_with = "de_lenient_string")]
    pub abstract_game_state: String,
}

impl GameStatus {
    /// Neither scheduled (`S`), pre-game (`P`) nor final (`F`).
    pub fn in_progress(&self) -> bool {
        !matches!(self.status_code.as_str(), "S" | "P" | "F" | "")
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LeagueRecord {
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScheduleTeam {
    #[serde(default)]
    pub team: NamedRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(rename = "leagueRecord", default, skip_serializing_if = "Option::is_none")]
    pub league_record: Option<LeagueRecord>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Matchup<T> {
    #[serde(default)]
    pub away: T,
    #[serde(default)]
    pub home: T,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GameSummary {
    #[serde(rename = "gamePk")]
    pub game_pk: u64,
    #[serde(rename = "gameDate", default, deserialize_with = "de_lenient_string")]
    pub game_date: String,
    #[serde(default)]
    pub status: GameStatus,
    #[serde(default)]
    pub teams: Matchup<ScheduleTeam>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<NamedRef>,
}

// MLB Stats API live feed

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LiveFeed {
    #[serde(rename = "gamePk", default)]
    pub game_pk: u64,
    #[serde(rename = "gameData", default)]
    pub game_data: GameData,
    #[serde(rename = "liveData", default)]
    pub live_data: LiveData,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GameData {
    #[serde(default)]
    pub teams: Matchup<FeedTeam>,
    #[serde(default)]
    pub status: GameStatus,
    #[serde(default)]
    pub venue: NamedRef,
    #[serde(default)]
    pub datetime: GameDateTime,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FeedTeam {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub name: String,
    #[serde(rename = "teamName", default, deserialize_with = "de_lenient_string")]
    pub team_name: String,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub abbreviation: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GameDateTime {
    #[serde(rename = "dateTime", default, deserialize_with = "de_lenient_string")]
    pub date_time: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LiveData {
    #[serde(default)]
    pub linescore: Linescore,
    #[serde(default)]
    pub boxscore: Boxscore,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RunsHitsErrors {
    #[serde(default)]
    pub runs: u32,
    #[serde(default)]
    pub hits: u32,
    #[serde(default)]
    pub errors: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Inning {
    #[serde(default)]
    pub num: u32,
    /// Absent for a bottom half that was never played.
    #[serde(default)]
    pub away: Option<RunsHitsErrors>,
    #[serde(default)]
    pub home: Option<RunsHitsErrors>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Linescore {
    #[serde(default)]
    pub innings: Vec<Inning>,
    #[serde(default)]
    pub teams: Matchup<RunsHitsErrors>,
    #[serde(rename = "currentInning", default, skip_serializing_if = "Option::is_none")]
    pub current_inning: Option<u32>,
    /// `Top` or `Bottom`.
    #[serde(rename = "inningHalf", default, deserialize_with = "de_lenient_string")]
    pub inning_half: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Boxscore {
    #[serde(default)]
    pub teams: Matchup<BoxscoreTeam>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BoxscoreTeam {
    #[serde(default)]
    pub batters: Vec<u64>,
    #[serde(default)]
    pub pitchers: Vec<u64>,
    /// Keyed `ID<person id>`.
    #[serde(default)]
    pub players: BTreeMap<String, BoxscorePlayer>,
}

impl BoxscoreTeam {
    pub fn player(&self, id: u64) -> Option<&BoxscorePlayer> {
        self.players.get(&format!("ID{id}"))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BoxscorePlayer {
    #[serde(default)]
    pub person: Person,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub stats: PlayerGameStats,
    #[serde(rename = "seasonStats", default)]
    pub season_stats: PlayerGameStats,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Position {
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub abbreviation: String,
    #[serde(rename = "type", default, deserialize_with = "de_lenient_string")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlayerGameStats {
    #[serde(default)]
    pub batting: BTreeMap<String, Value>,
    #[serde(default)]
    pub pitching: BTreeMap<String, Value>,
}

impl BoxscorePlayer {
    pub fn is_pitcher(&self) -> bool {
        self.position.as_ref().is_some_and(|p| p.kind == "Pitcher")
    }

    pub fn batting(&self, key: &str) -> f64 {
        self.stats.batting.get(key).and_then(value_as_f64).unwrap_or(0.0)
    }

    pub fn pitching(&self, key: &str) -> Option<&Value> {
        self.stats.pitching.get(key)
    }
}

/// Stat names from `/available-stats`, which may be a list of strings, a list
/// of `{ key | name }` objects or an object keyed by stat.
pub fn available_stat_names(payload: &Value) -> Vec<String> {
    let payload = match payload {
        Value::Object(map) if map.contains_key("data") => &map["data"],
        other => other,
    };
    match payload {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Object(obj) => obj
                    .get("key")
                    .or_else(|| obj.get("name"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                _ => None,
            })
            .collect(),
        Value::Object(map) => map.keys().cloned().collect(),
        _ => Vec::new(),
    }
}
