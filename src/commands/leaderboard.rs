//! Team and player leaderboards with derived advanced columns.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use super::common::{matches_search, print_json, render_table, CommandContext};
use crate::{
    api::{Leaderboard, LeaderboardQuery, StatRecord},
    cli::types::{Season, SortDirection, StatGroup},
    stats::{enrich_batting, enrich_pitching, format_stat},
    Result,
};

pub const BATTING_COLUMNS: &[&str] = &[
    "G", "PA", "R", "H", "HR", "RBI", "SB", "BB%", "K%", "AVG", "OBP", "SLG", "OPS", "ISO",
    "wOBA", "wRC+", "WAR",
];

pub const PITCHING_COLUMNS: &[&str] = &[
    "W", "L", "ERA", "G", "GS", "SV", "IP", "SO", "BB", "WHIP", "K/9", "BB/9", "HR/9", "K-BB%",
    "FIP", "WAR",
];

pub fn columns(group: StatGroup) -> &'static [&'static str] {
    match group {
        StatGroup::Batting => BATTING_COLUMNS,
        StatGroup::Pitching => PITCHING_COLUMNS,
    }
}

/// Parameters for the leaderboard commands
pub struct LeaderboardParams {
    pub board: Leaderboard,
    pub season: Option<Season>,
    pub query: LeaderboardQuery,
    pub search: Option<String>,
    pub as_json: bool,
}

/// Column key as the rows spell it: `ops` finds `OPS`.
pub fn resolve_stat_key<R: StatRecord>(rows: &[R], requested: &str) -> Option<String> {
    rows.iter().find_map(|row| {
        if row.stat(requested).is_some() {
            return Some(requested.to_string());
        }
        row.numeric_stats()
            .into_keys()
            .find(|key| key.eq_ignore_ascii_case(requested))
    })
}

/// Sort rows by one column. Rows without the column go last either way.
pub fn sort_rows<R: StatRecord>(rows: &mut [R], key: &str, direction: SortDirection) {
    rows.sort_by(|a, b| match (a.stat(key), b.stat(key)) {
        (Some(x), Some(y)) => match direction {
            SortDirection::Asc => x.total_cmp(&y),
            SortDirection::Desc => y.total_cmp(&x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Keep rows whose name or team contains `search`.
pub fn filter_rows<R: StatRecord>(rows: Vec<R>, search: Option<&str>) -> Vec<R> {
    match search {
        Some(needle) => rows
            .into_iter()
            .filter(|row| matches_search(&[row.name(), row.team()], needle))
            .collect(),
        None => rows,
    }
}

/// Header and body cells, ranked from 1.
pub fn table_cells<R: StatRecord>(
    rows: &[R],
    board: Leaderboard,
    columns: &[&str],
) -> (Vec<String>, Vec<Vec<String>>) {
    let mut header = vec!["#".to_string()];
    if !board.is_team() {
        header.push("Name".to_string());
    }
    header.push("Team".to_string());
    header.extend(columns.iter().map(|c| c.to_string()));

    let body = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let mut cells = vec![(idx + 1).to_string()];
            if !board.is_team() {
                cells.push(row.name().to_string());
            }
            cells.push(row.team().to_string());
            cells.extend(columns.iter().map(|c| format_stat(c, row.stat(c))));
            cells
        })
        .collect();
    (header, body)
}

fn arrange<R: StatRecord>(mut rows: Vec<R>, params: &LeaderboardParams) -> Vec<R> {
    rows = filter_rows(rows, params.search.as_deref());
    if let Some(requested) = params.query.sort_stat.as_deref() {
        let direction = params
            .query
            .direction
            .unwrap_or(params.board.group().default_direction());
        if let Some(key) = resolve_stat_key(&rows, requested) {
            sort_rows(&mut rows, &key, direction);
        }
    }
    rows
}

fn show<R: StatRecord + Serialize>(
    rows: &[R],
    params: &LeaderboardParams,
    season: Season,
) -> Result<()> {
    if params.as_json {
        return print_json(rows);
    }
    if rows.is_empty() {
        println!("No rows for {} {season}.", params.board.data_type());
        return Ok(());
    }
    let (header, body) = table_cells(rows, params.board, columns(params.board.group()));
    println!("{} {season}", params.board.data_type());
    println!("{}", render_table(&header, &body));
    Ok(())
}

/// Handle the `team-batting`, `team-pitching`, `player-batting` and
/// `player-pitching` commands
pub async fn handle_leaderboard(ctx: &CommandContext, params: LeaderboardParams) -> Result<()> {
    let season = ctx.season(params.season)?;
    let api = &ctx.api;

    match params.board.group() {
        StatGroup::Batting => {
            let mut rows = match params.board {
                Leaderboard::TeamBatting => api.team_batting(season, &params.query).await?,
                _ => api.player_batting(season, &params.query).await?,
            };
            rows.iter_mut().for_each(enrich_batting);
            let rows = arrange(rows, &params);
            debug!(rows = rows.len(), "Batting leaderboard ready");
            show(&rows, &params, season)
        }
        StatGroup::Pitching => {
            let mut rows = match params.board {
                Leaderboard::TeamPitching => api.team_pitching(season, &params.query).await?,
                _ => api.player_pitching(season, &params.query).await?,
            };
            rows.iter_mut().for_each(enrich_pitching);
            let rows = arrange(rows, &params);
            debug!(rows = rows.len(), "Pitching leaderboard ready");
            show(&rows, &params, season)
        }
    }
}
