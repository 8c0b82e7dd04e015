//! Single-player breakdown: league percentiles per stat category, a letter
//! rating, advanced batting rates and positional benchmarks.

use serde::Serialize;
use tracing::debug;

use super::common::{headers, print_json, render_table, CommandContext};
use crate::{
    api::{BattingLine, LeaderboardQuery, StatRecord},
    cli::types::{Season, StatGroup},
    error::HanksTankError,
    stats::{
        column, enrich_batting, enrich_pitching, format_stat,
        formulas::{
            babip, base_runs, bb_percent, era_rating, iso, k_percent, ops_rating,
            percentile_label, plate_appearances, position_benchmarks, round_to,
            secondary_average, woba, Benchmark, Rating,
        },
        is_lower_better, percentile_rank,
    },
    Result,
};

/// Rows requested so the percentile population covers every regular.
pub const PLAYER_POOL: u32 = 500;

pub const BATTING_CATEGORIES: &[(&str, &[&str])] = &[
    ("Overall", &["AVG", "OBP", "SLG", "OPS", "wOBA", "wRC+"]),
    ("Power", &["HR", "RBI", "ISO", "SLG", "TB"]),
    ("Contact", &["AVG", "BABIP", "K%", "BB%"]),
    ("Speed", &["SB", "CS", "SB%"]),
    (
        "Counting",
        &["G", "PA", "AB", "R", "H", "2B", "3B", "HR", "RBI", "BB", "SO"],
    ),
];

pub const PITCHING_CATEGORIES: &[(&str, &[&str])] = &[
    ("Overall", &["ERA", "WHIP", "FIP", "xFIP", "K/9", "BB/9"]),
    ("Strikeouts", &["SO", "K/9", "K%", "K-BB%"]),
    ("Control", &["BB/9", "BB%", "WHIP"]),
    ("Results", &["W", "L", "SV", "ERA", "WHIP"]),
    ("Counting", &["G", "GS", "IP", "SO", "BB", "H", "ER", "HR"]),
];

/// Stats in a named category; the name ignores case.
pub fn category_stats(group: StatGroup, category: &str) -> Result<&'static [&'static str]> {
    let categories = match group {
        StatGroup::Batting => BATTING_CATEGORIES,
        StatGroup::Pitching => PITCHING_CATEGORIES,
    };
    categories
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(category.trim()))
        .map(|(_, stats)| *stats)
        .ok_or_else(|| HanksTankError::Config {
            message: format!(
                "unknown {group} category '{category}', expected one of: {}",
                categories
                    .iter()
                    .map(|(name, _)| *name)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        })
}

/// Exact name match first, then the first row whose name contains `query`.
pub fn find_player<'a, R: StatRecord>(rows: &'a [R], query: &str) -> Result<&'a R> {
    let needle = query.trim().to_lowercase();
    rows.iter()
        .find(|r| r.name().to_lowercase() == needle)
        .or_else(|| rows.iter().find(|r| r.name().to_lowercase().contains(&needle)))
        .ok_or_else(|| HanksTankError::PlayerNotFound {
            name: query.to_string(),
        })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatPercentile {
    pub stat: String,
    pub value: Option<f64>,
    pub display: String,
    pub percentile: u32,
    pub label: &'static str,
}

/// Percentile of `player` within `population` for each stat. A stat the
/// player lacks ranks 0.
pub fn stat_percentiles<R: StatRecord>(
    player: &R,
    population: &[R],
    stats: &[&str],
) -> Vec<StatPercentile> {
    stats
        .iter()
        .map(|stat| {
            let value = player.stat(stat);
            let percentile = value
                .map(|v| percentile_rank(v, &column(population, stat), is_lower_better(stat)))
                .unwrap_or(0);
            StatPercentile {
                stat: stat.to_string(),
                value,
                display: format_stat(stat, value),
                percentile,
                label: percentile_label(percentile),
            }
        })
        .collect()
}

/// Mean percentile, rounded.
pub fn composite_score(percentiles: &[StatPercentile]) -> u32 {
    if percentiles.is_empty() {
        return 0;
    }
    let total: u32 = percentiles.iter().map(|p| p.percentile).sum();
    (f64::from(total) / percentiles.len() as f64).round() as u32
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvancedBatting {
    pub woba: String,
    pub iso: String,
    pub babip: String,
    pub bb_percent: String,
    pub k_percent: String,
    pub secondary_average: String,
    pub base_runs: String,
    pub plate_appearances: f64,
}

impl From<&BattingLine> for AdvancedBatting {
    fn from(line: &BattingLine) -> Self {
        Self {
            woba: woba(line),
            iso: iso(line),
            babip: babip(line),
            bb_percent: bb_percent(line),
            k_percent: k_percent(line),
            secondary_average: secondary_average(line),
            base_runs: base_runs(line),
            plate_appearances: plate_appearances(line),
        }
    }
}

/// The player's line against a position's typical one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkCheck {
    pub position: String,
    pub benchmark: Benchmark,
    pub avg_diff: f64,
    pub hr_diff: f64,
    pub ops_diff: f64,
}

pub fn benchmark_check(position: &str, line: &BattingLine) -> BenchmarkCheck {
    let benchmark = position_benchmarks(position);
    BenchmarkCheck {
        position: position.trim().to_uppercase(),
        avg_diff: round_to(line.avg - benchmark.avg, 3),
        hr_diff: line.home_runs - benchmark.hr,
        ops_diff: round_to(line.ops - benchmark.ops, 3),
        benchmark,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerAnalysis {
    pub name: String,
    pub team: String,
    pub season: Season,
    pub category: String,
    pub pool_size: usize,
    pub percentiles: Vec<StatPercentile>,
    pub composite: u32,
    pub rating: Rating,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advanced: Option<AdvancedBatting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<BenchmarkCheck>,
}

pub struct AnalysisParams {
    pub name: String,
    pub group: StatGroup,
    pub category: String,
    pub position: Option<String>,
    pub season: Option<Season>,
    pub as_json: bool,
}

fn analyse<R: StatRecord>(
    rows: &[R],
    params: &AnalysisParams,
    season: Season,
    rate: impl Fn(&R) -> Rating,
    extras: impl Fn(&R) -> (Option<AdvancedBatting>, Option<BenchmarkCheck>),
) -> Result<PlayerAnalysis> {
    let stats = category_stats(params.group, &params.category)?;
    let player = find_player(rows, &params.name)?;
    let percentiles = stat_percentiles(player, rows, stats);
    let (advanced, benchmark) = extras(player);

    Ok(PlayerAnalysis {
        name: player.name().to_string(),
        team: player.team().to_string(),
        season,
        category: params.category.clone(),
        pool_size: rows.len(),
        composite: composite_score(&percentiles),
        percentiles,
        rating: rate(player),
        advanced,
        benchmark,
    })
}

pub async fn analyze_player(
    ctx: &CommandContext,
    params: &AnalysisParams,
) -> Result<PlayerAnalysis> {
    let season = ctx.season(params.season)?;
    // Fail on a bad category before any request is made
    category_stats(params.group, &params.category)?;
    let query = LeaderboardQuery {
        limit: Some(PLAYER_POOL),
        ..LeaderboardQuery::default()
    };

    let analysis = match params.group {
        StatGroup::Batting => {
            let mut rows = ctx.api.player_batting(season, &query).await?;
            rows.iter_mut().for_each(enrich_batting);
            analyse(
                &rows,
                params,
                season,
                |p| ops_rating(p.line.ops),
                |p| {
                    (
                        Some(AdvancedBatting::from(&p.line)),
                        params
                            .position
                            .as_deref()
                            .map(|pos| benchmark_check(pos, &p.line)),
                    )
                },
            )?
        }
        StatGroup::Pitching => {
            let mut rows = ctx.api.player_pitching(season, &query).await?;
            rows.iter_mut().for_each(enrich_pitching);
            analyse(
                &rows,
                params,
                season,
                |p| era_rating(p.line.era),
                |_| (None, None),
            )?
        }
    };
    debug!(player = %analysis.name, pool = analysis.pool_size, "Player analysed");
    Ok(analysis)
}

/// Handle the `analyze-player` command
pub async fn handle_analyze_player(ctx: &CommandContext, params: AnalysisParams) -> Result<()> {
    let analysis = analyze_player(ctx, &params).await?;
    if params.as_json {
        return print_json(&analysis);
    }

    println!(
        "{} ({}) {}  {} [{}]",
        analysis.name, analysis.team, analysis.season, analysis.rating.label, analysis.rating.tier
    );
    println!(
        "{} composite: {}th percentile of {} players\n",
        analysis.category, analysis.composite, analysis.pool_size
    );

    let body: Vec<Vec<String>> = analysis
        .percentiles
        .iter()
        .map(|p| {
            vec![
                p.stat.clone(),
                p.display.clone(),
                p.percentile.to_string(),
                p.label.to_string(),
            ]
        })
        .collect();
    println!("{}", render_table(&headers(&["Stat", "Value", "Pctl", ""]), &body));

    if let Some(adv) = &analysis.advanced {
        println!("\nAdvanced");
        println!(
            "  wOBA {}  ISO {}  BABIP {}  BB% {}  K% {}",
            adv.woba, adv.iso, adv.babip, adv.bb_percent, adv.k_percent
        );
        println!(
            "  SecA {}  BaseRuns {}  PA {}",
            adv.secondary_average, adv.base_runs, adv.plate_appearances
        );
    }
    if let Some(check) = &analysis.benchmark {
        println!("\nVs typical {}", check.position);
        println!(
            "  AVG {:+.3}  HR {:+}  OPS {:+.3}",
            check.avg_diff, check.hr_diff, check.ops_diff
        );
    }
    Ok(())
}
