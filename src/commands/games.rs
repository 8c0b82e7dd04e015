//! Scoreboard and box score, straight from the MLB Stats API.

use chrono::{DateTime, Local};
use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::common::{headers, print_json, render_table, CommandContext};
use crate::{
    api::{
        types::{BoxscoreTeam, GameStatus, ScheduleTeam},
        GameSummary, LiveFeed,
    },
    cli::types::{GameDate, GamePk},
    Result,
};

/// Innings always shown; later ones are appended as extras.
pub const REGULATION_INNINGS: usize = 9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinescoreTable {
    pub header: Vec<String>,
    pub away: Vec<String>,
    pub home: Vec<String>,
}

impl LinescoreTable {
    pub fn render(&self) -> String {
        render_table(&self.header, &[self.away.clone(), self.home.clone()])
    }
}

/// Nine inning columns, one column per extra inning, then R, H and E.
/// Halves not yet played are blank.
pub fn linescore_table(feed: &LiveFeed) -> LinescoreTable {
    let linescore = &feed.live_data.linescore;
    let columns = linescore.innings.len().max(REGULATION_INNINGS);

    let mut header = vec![String::new()];
    header.extend((1..=columns).map(|n| n.to_string()));
    header.extend(headers(&["R", "H", "E"]));

    let teams = &feed.game_data.teams;
    let row = |name: &str, home: bool| -> Vec<String> {
        let mut cells = vec![name.to_string()];
        cells.extend((0..columns).map(|idx| {
            linescore
                .innings
                .get(idx)
                .and_then(|inning| if home { inning.home } else { inning.away })
                .map(|half| half.runs.to_string())
                .unwrap_or_default()
        }));
        let totals = if home {
            linescore.teams.home
        } else {
            linescore.teams.away
        };
        cells.extend([
            totals.runs.to_string(),
            totals.hits.to_string(),
            totals.errors.to_string(),
        ]);
        cells
    };

    LinescoreTable {
        away: row(&teams.away.team_name, false),
        home: row(&teams.home.team_name, true),
        header,
    }
}

/// Start time, `Pregame`, `Final`, the live inning or the detailed state.
pub fn status_label(game_date: &str, status: &GameStatus, feed: Option<&LiveFeed>) -> String {
    match status.status_code.as_str() {
        "S" => DateTime::parse_from_rfc3339(game_date)
            .map(|start| start.with_timezone(&Local).format("%-I:%M %p").to_string())
            .unwrap_or_else(|_| "Scheduled".to_string()),
        "P" => "Pregame".to_string(),
        "F" => "Final".to_string(),
        _ if status.in_progress() => {
            let linescore = feed.map(|f| &f.live_data.linescore);
            match linescore.and_then(|l| l.current_inning.map(|n| (l, n))) {
                Some((l, inning)) if !l.inning_half.is_empty() => {
                    format!("{} {inning}", l.inning_half.to_uppercase())
                }
                _ => status.detailed_state.clone(),
            }
        }
        _ => status.detailed_state.clone(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GameCard {
    pub game_pk: u64,
    pub away: String,
    pub home: String,
    pub away_record: Option<String>,
    pub home_record: Option<String>,
    pub status: String,
    pub linescore: Option<LinescoreTable>,
}

pub fn game_card(game: &GameSummary, feed: Option<&LiveFeed>) -> GameCard {
    let record = |team: &ScheduleTeam| {
        team.league_record
            .as_ref()
            .map(|r| format!("{}-{}", r.wins, r.losses))
    };
    GameCard {
        game_pk: game.game_pk,
        away: game.teams.away.team.name.clone(),
        home: game.teams.home.team.name.clone(),
        away_record: record(&game.teams.away),
        home_record: record(&game.teams.home),
        status: status_label(&game.game_date, &game.status, feed),
        linescore: feed.map(linescore_table),
    }
}

/// Schedule for `date` plus every game's live feed, fetched concurrently.
/// A feed that fails to load leaves its card without a linescore.
pub async fn load_games(ctx: &CommandContext, date: GameDate) -> Result<Vec<GameCard>> {
    let games = ctx.api.games(date).await?;
    debug!(%date, games = games.len(), "Schedule loaded");

    let feeds = join_all(
        games
            .iter()
            .map(|game| ctx.api.game_details(GamePk::new(game.game_pk))),
    )
    .await;

    Ok(games
        .iter()
        .zip(feeds)
        .map(|(game, feed)| {
            let feed = feed
                .map_err(|e| warn!(game_pk = game.game_pk, error = %e, "Live feed unavailable"))
                .ok();
            game_card(game, feed.as_ref())
        })
        .collect())
}

/// Handle the `games` command
pub async fn handle_games(
    ctx: &CommandContext,
    date: Option<GameDate>,
    as_json: bool,
) -> Result<()> {
    let date = date.unwrap_or_default();
    let cards = load_games(ctx, date).await?;

    if as_json {
        return print_json(&cards);
    }
    if cards.is_empty() {
        println!("No games scheduled on {date}.");
        return Ok(());
    }
    println!("Games on {date}\n");
    for card in &cards {
        let with_record = |name: &str, record: &Option<String>| match record {
            Some(r) => format!("{name} ({r})"),
            None => name.to_string(),
        };
        println!(
            "{} @ {}  [{}]  #{}",
            with_record(&card.away, &card.away_record),
            with_record(&card.home, &card.home_record),
            card.status,
            card.game_pk
        );
        if let Some(table) = &card.linescore {
            println!("{}", table.render());
        }
        println!();
    }
    Ok(())
}

/// Plain text for a stat cell: strings as sent, numbers as numbers.
fn cell(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "-".to_string(),
    }
}

/// One row per batter who appeared, pitchers excluded.
pub fn batting_rows(team: &BoxscoreTeam) -> Vec<Vec<String>> {
    team.batters
        .iter()
        .filter_map(|id| team.player(*id))
        .filter(|p| !p.is_pitcher() && !p.stats.batting.is_empty())
        .map(|p| {
            let game = &p.stats.batting;
            let season = &p.season_stats.batting;
            vec![
                p.person.full_name.clone(),
                p.position
                    .as_ref()
                    .map(|pos| pos.abbreviation.clone())
                    .unwrap_or_else(|| "N/A".to_string()),
                cell(game.get("atBats")),
                cell(game.get("hits")),
                cell(game.get("strikeOuts")),
                cell(game.get("baseOnBalls")),
                cell(game.get("rbi")),
                cell(season.get("avg")),
                cell(season.get("obp")),
                cell(season.get("slg")),
            ]
        })
        .collect()
}

pub fn pitching_rows(team: &BoxscoreTeam) -> Vec<Vec<String>> {
    team.pitchers
        .iter()
        .filter_map(|id| team.player(*id))
        .filter(|p| !p.stats.pitching.is_empty())
        .map(|p| {
            let season = &p.season_stats.pitching;
            vec![
                p.person.full_name.clone(),
                format!("{}-{}", cell(season.get("wins")), cell(season.get("losses"))),
                cell(season.get("era")),
                cell(p.pitching("inningsPitched")),
                cell(p.pitching("strikeOuts")),
                cell(p.pitching("baseOnBalls")),
                cell(p.pitching("hits")),
                cell(p.pitching("runs")),
                cell(season.get("whip")),
                cell(season.get("strikeoutsPer9Inn")),
            ]
        })
        .collect()
}

/// Handle the `boxscore` command
pub async fn handle_boxscore(ctx: &CommandContext, game_pk: GamePk, as_json: bool) -> Result<()> {
    let feed = ctx.api.game_details(game_pk).await?;
    if as_json {
        return print_json(&feed);
    }

    let data = &feed.game_data;
    println!("{} @ {}", data.teams.away.team_name, data.teams.home.team_name);
    println!("{}  {}", data.venue.name, data.datetime.date_time);
    println!("Status: {}\n", data.status.detailed_state);
    println!("{}\n", linescore_table(&feed).render());

    let boxscore = &feed.live_data.boxscore;
    let batting_header = headers(&[
        "Batter", "Pos", "AB", "H", "SO", "BB", "RBI", "AVG", "OBP", "SLG",
    ]);
    let pitching_header = headers(&[
        "Pitcher", "W-L", "ERA", "IP", "SO", "BB", "H", "R", "WHIP", "K/9",
    ]);
    for (name, team) in [
        (&data.teams.away.team_name, &boxscore.teams.away),
        (&data.teams.home.team_name, &boxscore.teams.home),
    ] {
        println!("{name}");
        println!("{}\n", render_table(&batting_header, &batting_rows(team)));
        println!("{}\n", render_table(&pitching_header, &pitching_rows(team)));
    }
    Ok(())
}
