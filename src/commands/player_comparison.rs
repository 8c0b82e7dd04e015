//! Head-to-head comparison of two to six players from one season's pool.

use serde::Serialize;
use tracing::debug;

use super::{
    analysis::{
        category_stats, composite_score, find_player, stat_percentiles, StatPercentile,
        PLAYER_POOL,
    },
    common::{headers, print_json, render_table, CommandContext},
};
use crate::{
    api::{LeaderboardQuery, StatRecord},
    cli::types::{Season, StatGroup},
    error::HanksTankError,
    stats::{
        enrich_batting, enrich_pitching, format_stat,
        formulas::{iso, woba},
        is_lower_better,
    },
    Result,
};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;

pub const BATTING_STATS: &[&str] = &["AVG", "OBP", "SLG", "HR", "RBI", "R", "SB"];
pub const PITCHING_STATS: &[&str] = &["ERA", "WHIP", "SO", "W", "IP"];

/// Values this close to the best one share the win.
pub const TIE_TOLERANCE: f64 = 0.001;

/// Reject a selection outside two to six names before anything is fetched.
pub fn check_selection(names: &[String]) -> Result<()> {
    if (MIN_PLAYERS..=MAX_PLAYERS).contains(&names.len()) {
        Ok(())
    } else {
        Err(HanksTankError::Config {
            message: format!(
                "compare between {MIN_PLAYERS} and {MAX_PLAYERS} players, got {}",
                names.len()
            ),
        })
    }
}

/// A named category's stats, or the core line for the group.
pub fn comparison_stats(
    group: StatGroup,
    category: Option<&str>,
) -> Result<&'static [&'static str]> {
    match category {
        Some(category) => category_stats(group, category),
        None => Ok(match group {
            StatGroup::Batting => BATTING_STATS,
            StatGroup::Pitching => PITCHING_STATS,
        }),
    }
}

/// One stat across the selected players.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadToHeadRow {
    pub stat: String,
    /// In selection order; a missing stat reads as 0.
    pub values: Vec<f64>,
    /// Every player within [`TIE_TOLERANCE`] of the best value.
    pub winners: Vec<usize>,
    pub is_tie: bool,
}

pub fn head_to_head_row(stat: &str, values: Vec<f64>) -> HeadToHeadRow {
    let lower = is_lower_better(stat);
    let best = values
        .iter()
        .copied()
        .reduce(|a, b| if lower { a.min(b) } else { a.max(b) });
    let winners: Vec<usize> = match best {
        Some(best) => values
            .iter()
            .enumerate()
            .filter(|(_, value)| (**value - best).abs() <= TIE_TOLERANCE)
            .map(|(idx, _)| idx)
            .collect(),
        None => Vec::new(),
    };
    HeadToHeadRow {
        stat: stat.to_string(),
        is_tie: winners.len() > 1,
        winners,
        values,
    }
}

/// Stats won outright, shared and lost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HeadToHeadRecord {
    pub wins: usize,
    pub ties: usize,
    pub losses: usize,
}

pub fn head_to_head_records(rows: &[HeadToHeadRow], players: usize) -> Vec<HeadToHeadRecord> {
    (0..players)
        .map(|idx| {
            let mut record = HeadToHeadRecord::default();
            for row in rows {
                match (row.winners.contains(&idx), row.is_tie) {
                    (true, false) => record.wins += 1,
                    (true, true) => record.ties += 1,
                    (false, _) => record.losses += 1,
                }
            }
            record
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparedPlayer {
    pub name: String,
    pub team: String,
    pub percentiles: Vec<StatPercentile>,
    pub composite: u32,
    pub record: HeadToHeadRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub woba: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerComparison {
    pub season: Season,
    pub pool_size: usize,
    pub stats: Vec<String>,
    pub players: Vec<ComparedPlayer>,
    pub head_to_head: Vec<HeadToHeadRow>,
}

fn same_player<R: StatRecord>(a: &R, b: &R) -> bool {
    std::ptr::eq(a, b) || a.player_id().is_some_and(|id| b.player_id() == Some(id))
}

/// Resolve `names` in `pool` and compare them stat by stat. A name that
/// resolves to an already selected player is skipped.
pub fn build_player_comparison<R: StatRecord>(
    season: Season,
    pool: &[R],
    names: &[String],
    stats: &[&str],
    advanced: impl Fn(&R) -> (Option<String>, Option<String>),
) -> Result<PlayerComparison> {
    let mut picks: Vec<&R> = Vec::with_capacity(names.len());
    for name in names {
        let player = find_player(pool, name)?;
        if picks.iter().any(|picked| same_player(*picked, player)) {
            debug!(name = player.name(), "Player selected twice");
            continue;
        }
        picks.push(player);
    }
    if picks.len() < MIN_PLAYERS {
        return Err(HanksTankError::Config {
            message: format!("compare at least {MIN_PLAYERS} different players"),
        });
    }

    let head_to_head: Vec<HeadToHeadRow> = stats
        .iter()
        .map(|stat| {
            let values = picks.iter().map(|p| p.stat_or_zero(stat)).collect();
            head_to_head_row(stat, values)
        })
        .collect();
    let records = head_to_head_records(&head_to_head, picks.len());

    let players = picks
        .iter()
        .zip(records)
        .map(|(&player, record)| {
            let percentiles = stat_percentiles(player, pool, stats);
            let (woba, iso) = advanced(player);
            ComparedPlayer {
                name: player.name().to_string(),
                team: player.team().to_string(),
                composite: composite_score(&percentiles),
                percentiles,
                record,
                woba,
                iso,
            }
        })
        .collect();

    Ok(PlayerComparison {
        season,
        pool_size: pool.len(),
        stats: stats.iter().map(|s| s.to_string()).collect(),
        players,
        head_to_head,
    })
}

pub struct PlayerComparisonParams {
    pub names: Vec<String>,
    pub group: StatGroup,
    pub category: Option<String>,
    pub season: Option<Season>,
    pub as_json: bool,
}

pub async fn compare_players(
    ctx: &CommandContext,
    params: &PlayerComparisonParams,
) -> Result<PlayerComparison> {
    check_selection(&params.names)?;
    let stats = comparison_stats(params.group, params.category.as_deref())?;
    let season = ctx.season(params.season)?;
    let query = LeaderboardQuery {
        limit: Some(PLAYER_POOL),
        ..LeaderboardQuery::default()
    };

    let comparison = match params.group {
        StatGroup::Batting => {
            let mut pool = ctx.api.player_batting(season, &query).await?;
            pool.iter_mut().for_each(enrich_batting);
            build_player_comparison(season, &pool, &params.names, stats, |p| {
                (Some(woba(&p.line)), Some(iso(&p.line)))
            })?
        }
        StatGroup::Pitching => {
            let mut pool = ctx.api.player_pitching(season, &query).await?;
            pool.iter_mut().for_each(enrich_pitching);
            build_player_comparison(season, &pool, &params.names, stats, |_| (None, None))?
        }
    };
    debug!(
        players = comparison.players.len(),
        pool = comparison.pool_size,
        "Players compared"
    );
    Ok(comparison)
}

fn labelled_row(label: &str, cells: impl Iterator<Item = Option<String>>) -> Vec<String> {
    let mut row = vec![label.to_string()];
    row.extend(cells.map(|cell| cell.unwrap_or_else(|| "-".to_string())));
    row
}

/// Handle the `compare-players` command
pub async fn handle_compare_players(
    ctx: &CommandContext,
    params: PlayerComparisonParams,
) -> Result<()> {
    let comparison = compare_players(ctx, &params).await?;
    if params.as_json {
        return print_json(&comparison);
    }

    let mut header = vec!["Stat".to_string()];
    header.extend(comparison.players.iter().map(|p| p.name.clone()));

    // Winners are starred; the league percentile follows in parentheses
    let mut body: Vec<Vec<String>> = comparison
        .head_to_head
        .iter()
        .enumerate()
        .map(|(stat_idx, row)| {
            let mut cells = vec![row.stat.clone()];
            cells.extend(comparison.players.iter().enumerate().map(|(idx, player)| {
                let value = format_stat(&row.stat, row.values.get(idx).copied());
                let pctl = player
                    .percentiles
                    .get(stat_idx)
                    .map(|p| p.percentile)
                    .unwrap_or(0);
                let star = if row.winners.contains(&idx) { "*" } else { "" };
                format!("{star}{value} ({pctl})")
            }));
            cells
        })
        .collect();

    if comparison.players.iter().any(|p| p.woba.is_some()) {
        body.push(labelled_row("wOBA", comparison.players.iter().map(|p| p.woba.clone())));
        body.push(labelled_row("ISO", comparison.players.iter().map(|p| p.iso.clone())));
    }
    body.push(labelled_row(
        "Composite",
        comparison.players.iter().map(|p| Some(p.composite.to_string())),
    ));

    println!(
        "Player comparison {} ({} players in pool)",
        comparison.season, comparison.pool_size
    );
    println!("{}", render_table(&header, &body));

    println!("\nHead-to-head");
    let records: Vec<Vec<String>> = comparison
        .players
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                p.record.wins.to_string(),
                p.record.ties.to_string(),
                p.record.losses.to_string(),
            ]
        })
        .collect();
    println!("{}", render_table(&headers(&["Player", "W", "T", "L"]), &records));
    Ok(())
}
