//! Division standings.

use serde::Serialize;
use tracing::debug;

use super::common::{headers, print_json, render_table, CommandContext};
use crate::{
    api::{types::StandingsResponse, TeamRecord},
    cli::types::Season,
    teams::{abbreviation_for, division_of, DIVISIONS},
    Result,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingRow {
    pub team: String,
    pub abbreviation: String,
    pub wins: u32,
    pub losses: u32,
    pub pct: String,
    pub games_back: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivisionTable {
    pub division: &'static str,
    pub teams: Vec<StandingRow>,
}

/// The backend's winning percentage, or W / (W + L) to three places.
pub fn winning_percentage(record: &TeamRecord) -> String {
    if !record.winning_percentage.is_empty() {
        return record.winning_percentage.clone();
    }
    let games = record.wins + record.losses;
    let pct = if games > 0.0 { record.wins / games } else { 0.0 };
    format!("{pct:.3}")
}

/// Games back, `--` for a division leader the backend sent none for.
pub fn games_back(record: &TeamRecord) -> String {
    if !record.games_back.is_empty() {
        record.games_back.clone()
    } else if record.division_rank == "1" {
        "--".to_string()
    } else {
        "-".to_string()
    }
}

impl From<&TeamRecord> for StandingRow {
    fn from(record: &TeamRecord) -> Self {
        Self {
            team: record.team.name.clone(),
            abbreviation: abbreviation_for(&record.team.name),
            wins: record.wins.max(0.0) as u32,
            losses: record.losses.max(0.0) as u32,
            pct: winning_percentage(record),
            games_back: games_back(record),
        }
    }
}

/// Flatten every team record and regroup it by the six divisions, most
/// wins first. Teams outside the franchise table are dropped.
pub fn group_by_division(standings: &StandingsResponse) -> Vec<DivisionTable> {
    let rows: Vec<(&'static str, StandingRow)> = standings
        .records
        .iter()
        .flat_map(|division| division.team_records.iter())
        .filter_map(|record| division_of(&record.team.name).map(|d| (d, record.into())))
        .collect();

    DIVISIONS
        .iter()
        .map(|&division| {
            let mut teams: Vec<StandingRow> = rows
                .iter()
                .filter(|(d, _)| *d == division)
                .map(|(_, row)| row.clone())
                .collect();
            teams.sort_by(|a, b| b.wins.cmp(&a.wins));
            DivisionTable { division, teams }
        })
        .collect()
}

pub fn render_division(table: &DivisionTable) -> String {
    let body: Vec<Vec<String>> = table
        .teams
        .iter()
        .map(|row| {
            vec![
                row.abbreviation.clone(),
                row.wins.to_string(),
                row.losses.to_string(),
                row.pct.clone(),
                row.games_back.clone(),
            ]
        })
        .collect();
    format!(
        "{}\n{}",
        table.division,
        render_table(&headers(&["Tm", "W", "L", "PCT", "GB"]), &body)
    )
}

/// Handle the `standings` command
pub async fn handle_standings(
    ctx: &CommandContext,
    season: Option<Season>,
    as_json: bool,
) -> Result<()> {
    let season = ctx.season(season)?;
    let standings = ctx.api.standings(season).await?;
    let divisions = group_by_division(&standings);
    debug!(divisions = divisions.len(), "Standings grouped");

    if as_json {
        return print_json(&divisions);
    }
    println!("Standings {season}\n");
    for table in &divisions {
        println!("{}\n", render_division(table));
    }
    Ok(())
}
