//! Season-over-season and head-to-head team comparisons.

use std::collections::{BTreeMap, BTreeSet};

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};

use super::common::{headers, print_json, render_table, CommandContext};
use crate::{
    api::{LeaderboardQuery, StatRecord},
    cli::types::{ComparisonKind, Season, StatGroup},
    error::HanksTankError,
    stats::{
        enrich_batting, enrich_pitching, format_stat,
        formulas::{consistency, fixed, round_to, trend_direction, Trend},
        is_lower_better, league_averages, percentile,
    },
    teams::{self, is_team_cell, Team},
    Result,
};

pub const SEASON_BATTING_STATS: &[&str] =
    &["AVG", "OBP", "SLG", "OPS", "HR", "RBI", "R", "SB", "BB", "SO"];
pub const SEASON_PITCHING_STATS: &[&str] = &["ERA", "WHIP", "SO", "BB", "W", "L", "SV", "IP"];

pub const TEAM_BATTING_STATS: &[&str] = &["AVG", "OBP", "SLG", "OPS", "HR", "RBI", "R"];
pub const TEAM_PITCHING_STATS: &[&str] = &["ERA", "WHIP", "SO", "W", "IP", "H", "BB"];

fn stat_list(requested: &[String], defaults: &[&str]) -> Vec<String> {
    if requested.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        requested.to_vec()
    }
}

/// One team's numeric columns for a season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStats {
    pub team: String,
    pub stats: BTreeMap<String, f64>,
}

impl TeamStats {
    pub fn from_record<R: StatRecord>(record: &R) -> Self {
        Self {
            team: record.team().to_string(),
            stats: record.numeric_stats(),
        }
    }
}

/// Every team's line for one season plus the league mean of each column.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonData {
    pub season: Season,
    pub teams: Vec<TeamStats>,
    pub averages: BTreeMap<String, f64>,
}

impl SeasonData {
    pub fn from_records<R: StatRecord>(season: Season, records: &[R]) -> Self {
        Self {
            season,
            teams: records.iter().map(TeamStats::from_record).collect(),
            averages: league_averages(records),
        }
    }
}

/// Team leaderboard for one season, with derived columns filled in.
pub async fn load_season(
    ctx: &CommandContext,
    group: StatGroup,
    season: Season,
) -> Result<SeasonData> {
    let query = LeaderboardQuery::default();
    Ok(match group {
        StatGroup::Batting => {
            let mut rows = ctx.api.team_batting(season, &query).await?;
            rows.iter_mut().for_each(enrich_batting);
            SeasonData::from_records(season, &rows)
        }
        StatGroup::Pitching => {
            let mut rows = ctx.api.team_pitching(season, &query).await?;
            rows.iter_mut().for_each(enrich_pitching);
            SeasonData::from_records(season, &rows)
        }
    })
}

/// One stat followed across seasons, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatTrend {
    pub label: String,
    pub values: Vec<Option<f64>>,
    /// Last value minus first, over the seasons that have one.
    pub change: Option<f64>,
    pub trend: Option<Trend>,
    pub consistency: f64,
}

impl StatTrend {
    pub fn new(label: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        let (change, trend) = match (present.first(), present.last()) {
            (Some(first), Some(last)) if present.len() >= 2 => (
                Some(round_to(last - first, 3)),
                Some(trend_direction(*last, *first)),
            ),
            _ => (None, None),
        };
        Self {
            label: label.into(),
            values,
            change,
            trend,
            consistency: round_to(consistency(&present), 1),
        }
    }

    pub fn change_text(&self) -> String {
        match self.change {
            Some(change) if change > 0.0 => format!("+{}", fixed(change, 3)),
            Some(change) => fixed(change, 3),
            None => "N/A".to_string(),
        }
    }
}

/// League mean of each stat per season; a season without data reads as 0.
pub fn league_trends(data: &[SeasonData], stats: &[String]) -> Vec<StatTrend> {
    stats
        .iter()
        .map(|stat| {
            let values = data
                .iter()
                .map(|season| Some(round_to(season.averages.get(stat).copied().unwrap_or(0.0), 3)))
                .collect();
            StatTrend::new(stat.clone(), values)
        })
        .collect()
}

/// Each team's value of `stat` per season, teams in alphabetical order.
/// Teams with no value in any season are left out.
pub fn team_trends(data: &[SeasonData], stat: &str, only: Option<&Team>) -> Vec<StatTrend> {
    let names: BTreeSet<&str> = data
        .iter()
        .flat_map(|season| season.teams.iter().map(|t| t.team.as_str()))
        .filter(|name| only.map_or(true, |team| is_team_cell(team, name)))
        .collect();

    names
        .into_iter()
        .filter_map(|name| {
            let values: Vec<Option<f64>> = data
                .iter()
                .map(|season| {
                    season
                        .teams
                        .iter()
                        .find(|t| t.team == name)
                        .and_then(|t| t.stats.get(stat).copied())
                })
                .collect();
            values
                .iter()
                .any(Option::is_some)
                .then(|| StatTrend::new(name, values))
        })
        .collect()
}

pub struct SeasonComparisonParams {
    pub kind: ComparisonKind,
    pub seasons: Vec<Season>,
    pub stats: Vec<String>,
    pub team: Option<String>,
    pub as_json: bool,
}

#[derive(Debug, Serialize)]
pub struct SeasonComparison {
    pub seasons: Vec<Season>,
    /// Keyed by stat; league comparisons have one trend per stat, team
    /// comparisons one per team.
    pub trends: BTreeMap<String, Vec<StatTrend>>,
}

/// Load every season concurrently. A season that fails is reported and
/// shown as empty.
pub async fn compare_seasons(
    ctx: &CommandContext,
    params: &SeasonComparisonParams,
) -> Result<SeasonComparison> {
    if params.seasons.is_empty() {
        return Err(HanksTankError::Config {
            message: "select at least one season".to_string(),
        });
    }
    let mut seasons = params
        .seasons
        .iter()
        .map(|s| ctx.season(Some(*s)))
        .collect::<Result<Vec<_>>>()?;
    seasons.sort();
    seasons.dedup();

    let only = params.team.as_deref().map(teams::lookup).transpose()?;
    let group = params.kind.group();
    let defaults = match group {
        StatGroup::Batting => SEASON_BATTING_STATS,
        StatGroup::Pitching => SEASON_PITCHING_STATS,
    };
    let stats = stat_list(&params.stats, defaults);

    let loaded = join_all(seasons.iter().map(|s| load_season(ctx, group, *s))).await;
    let data: Vec<SeasonData> = loaded
        .into_iter()
        .zip(&seasons)
        .map(|(result, season)| {
            result.unwrap_or_else(|e| {
                warn!(%season, error = %e, "Season unavailable");
                SeasonData {
                    season: *season,
                    teams: Vec::new(),
                    averages: BTreeMap::new(),
                }
            })
        })
        .collect();
    debug!(seasons = data.len(), "Comparison seasons loaded");

    let trends = if params.kind.is_league_average() {
        league_trends(&data, &stats)
            .into_iter()
            .map(|trend| (trend.label.clone(), vec![trend]))
            .collect()
    } else {
        stats
            .iter()
            .map(|stat| (stat.clone(), team_trends(&data, stat, only)))
            .collect()
    };

    Ok(SeasonComparison { seasons, trends })
}

fn trend_row(trend: &StatTrend) -> Vec<String> {
    let mut row = vec![trend.label.clone()];
    row.extend(trend.values.iter().map(|v| match v {
        Some(v) => fixed(*v, 3),
        None => "--".to_string(),
    }));
    row.push(trend.change_text());
    row.push(format!("{:.1}", trend.consistency));
    row
}

/// Handle the `compare-seasons` command
pub async fn handle_compare_seasons(
    ctx: &CommandContext,
    params: SeasonComparisonParams,
) -> Result<()> {
    let comparison = compare_seasons(ctx, &params).await?;
    if params.as_json {
        return print_json(&comparison);
    }

    let mut header = vec![if params.kind.is_league_average() {
        "Stat".to_string()
    } else {
        "Team".to_string()
    }];
    header.extend(comparison.seasons.iter().map(Season::to_string));
    header.extend(headers(&["Change", "Consistency"]));

    if params.kind.is_league_average() {
        let body: Vec<Vec<String>> = comparison
            .trends
            .iter()
            .flat_map(|(_, trends)| trends.iter().map(trend_row))
            .collect();
        println!("League averages\n{}", render_table(&header, &body));
        return Ok(());
    }

    for (stat, trends) in &comparison.trends {
        let body: Vec<Vec<String>> = trends.iter().map(trend_row).collect();
        println!("{stat}\n{}\n", render_table(&header, &body));
    }
    Ok(())
}

/// A team's line in a head-to-head comparison.
#[derive(Debug, Clone, Serialize)]
pub struct ComparedTeam {
    pub abbreviation: &'static str,
    pub name: &'static str,
    pub values: BTreeMap<String, f64>,
    /// League percentile per stat, already flipped for lower-is-better stats.
    pub percentiles: BTreeMap<String, u32>,
}

#[derive(Debug, Serialize)]
pub struct TeamComparison {
    pub season: Season,
    pub stats: Vec<String>,
    pub teams: Vec<ComparedTeam>,
    /// Best team abbreviation per stat.
    pub leaders: BTreeMap<String, &'static str>,
}

/// Compare `picks` against each other and the whole league.
pub fn build_team_comparison(
    season: Season,
    league: &SeasonData,
    picks: &[&'static Team],
    stats: &[String],
) -> Result<TeamComparison> {
    let mut teams = Vec::with_capacity(picks.len());
    for team in picks {
        let row = league
            .teams
            .iter()
            .find(|row| is_team_cell(team, &row.team))
            .ok_or_else(|| HanksTankError::TeamNotFound {
                name: team.name.to_string(),
            })?;

        let mut values = BTreeMap::new();
        let mut percentiles = BTreeMap::new();
        for stat in stats {
            let Some(value) = row.stats.get(stat).copied() else {
                continue;
            };
            let mut rank = percentile(value, &league_column(league, stat));
            if is_lower_better(stat) {
                rank = 100 - rank.min(100);
            }
            values.insert(stat.clone(), value);
            percentiles.insert(stat.clone(), rank);
        }
        teams.push(ComparedTeam {
            abbreviation: team.abbreviation,
            name: team.name,
            values,
            percentiles,
        });
    }

    let leaders = stats
        .iter()
        .filter_map(|stat| {
            let lower = is_lower_better(stat);
            teams
                .iter()
                .filter_map(|t| t.values.get(stat).map(|v| (t.abbreviation, *v)))
                .reduce(|best, next| {
                    let better = if lower { next.1 < best.1 } else { next.1 > best.1 };
                    if better {
                        next
                    } else {
                        best
                    }
                })
                .map(|(abbr, _)| (stat.clone(), abbr))
        })
        .collect();

    Ok(TeamComparison {
        season,
        stats: stats.to_vec(),
        teams,
        leaders,
    })
}

pub struct TeamComparisonParams {
    pub teams: Vec<String>,
    pub group: StatGroup,
    pub season: Option<Season>,
    pub stats: Vec<String>,
    pub as_json: bool,
}

pub async fn compare_teams(
    ctx: &CommandContext,
    params: &TeamComparisonParams,
) -> Result<TeamComparison> {
    let season = ctx.season(params.season)?;
    let picks = params
        .teams
        .iter()
        .map(|name| teams::lookup(name))
        .collect::<Result<Vec<_>>>()?;
    let defaults = match params.group {
        StatGroup::Batting => TEAM_BATTING_STATS,
        StatGroup::Pitching => TEAM_PITCHING_STATS,
    };
    let stats = stat_list(&params.stats, defaults);

    let league = load_season(ctx, params.group, season).await?;
    debug!(league_size = league.teams.len(), "League loaded for team comparison");
    build_team_comparison(season, &league, &picks, &stats)
}

/// Handle the `compare-teams` command
pub async fn handle_compare_teams(
    ctx: &CommandContext,
    params: TeamComparisonParams,
) -> Result<()> {
    let comparison = compare_teams(ctx, &params).await?;
    if params.as_json {
        return print_json(&comparison);
    }

    let mut header = vec!["Stat".to_string()];
    header.extend(comparison.teams.iter().map(|t| t.abbreviation.to_string()));
    header.push("Best".to_string());

    let body: Vec<Vec<String>> = comparison
        .stats
        .iter()
        .map(|stat| {
            let mut row = vec![stat.clone()];
            row.extend(comparison.teams.iter().map(|t| {
                match (t.values.get(stat), t.percentiles.get(stat)) {
                    (Some(v), Some(p)) => format!("{} ({p})", format_stat(stat, Some(*v))),
                    _ => "-".to_string(),
                }
            }));
            row.push(comparison.leaders.get(stat).copied().unwrap_or("-").to_string());
            row
        })
        .collect();

    println!("Team comparison {} (league percentile in parentheses)", comparison.season);
    println!("{}", render_table(&header, &body));
    Ok(())
}

/// Every value of `stat` across a league season.
pub fn league_column(league: &SeasonData, stat: &str) -> Vec<f64> {
    league
        .teams
        .iter()
        .filter_map(|t| t.stats.get(stat).copied())
        .collect()
}
