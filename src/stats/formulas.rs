//! Sabermetric formulas over batting lines and stat series.
//!
//! Every function is total: missing columns are zero and a zero denominator
//! yields the documented zero string instead of `NaN` or `inf`.

use serde::Serialize;

use crate::api::types::BattingLine;

#[cfg(test)]
mod tests;

/// Stats where a smaller number is the better one.
pub const LOWER_IS_BETTER: &[&str] = &["ERA", "WHIP", "BB/9", "HR/9", "BB%", "FIP", "xFIP", "SO"];

/// wOBA linear weights: uBB, HBP, 1B, 2B, 3B, HR.
const WOBA_WEIGHTS: [f64; 6] = [0.69, 0.72, 0.88, 1.27, 1.62, 2.10];

/// Fixed-point rendering that never prints `-0.000`. Ties round away from
/// zero (`6.25` to one place is `6.3`).
pub fn fixed(value: f64, decimals: usize) -> String {
    let rounded = round_to(value, i32::try_from(decimals).unwrap_or(i32::MAX));
    let rendered = format!("{rounded:.decimals$}");
    if rendered.starts_with('-') && rendered[1..].chars().all(|c| c == '0' || c == '.') {
        rendered[1..].to_string()
    } else {
        rendered
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

pub fn is_lower_better(stat: &str) -> bool {
    LOWER_IS_BETTER.contains(&stat)
}

/// Weighted on-base average.
pub fn woba(line: &BattingLine) -> String {
    let singles = line.hits - line.doubles - line.triples - line.home_runs;
    let [bb, hbp, single, double, triple, hr] = WOBA_WEIGHTS;
    let numerator = bb * line.walks
        + hbp * line.hit_by_pitch
        + single * singles
        + double * line.doubles
        + triple * line.triples
        + hr * line.home_runs;
    let denominator = line.at_bats + line.walks + line.sac_flies + line.hit_by_pitch;

    if denominator > 0.0 {
        fixed(numerator / denominator, 3)
    } else {
        ".000".to_string()
    }
}

/// Isolated power, SLG minus AVG.
pub fn iso(line: &BattingLine) -> String {
    fixed(line.slg - line.avg, 3)
}

/// Batting average on balls in play.
pub fn babip(line: &BattingLine) -> String {
    let denominator = line.at_bats - line.strikeouts - line.home_runs + line.sac_flies;
    if denominator > 0.0 {
        fixed((line.hits - line.home_runs) / denominator, 3)
    } else {
        ".000".to_string()
    }
}

/// PA when the backend sent it, otherwise AB.
fn pa_or_ab(line: &BattingLine) -> f64 {
    if line.plate_appearances > 0.0 {
        line.plate_appearances
    } else {
        line.at_bats
    }
}

fn rate_percent(count: f64, line: &BattingLine) -> String {
    let pa = pa_or_ab(line);
    if pa > 0.0 {
        fixed(count / pa * 100.0, 1)
    } else {
        "0.0".to_string()
    }
}

pub fn bb_percent(line: &BattingLine) -> String {
    rate_percent(line.walks, line)
}

pub fn k_percent(line: &BattingLine) -> String {
    rate_percent(line.strikeouts, line)
}

/// (TB - H + BB + SB) / AB
pub fn secondary_average(line: &BattingLine) -> String {
    if line.at_bats > 0.0 {
        let extra = line.total_bases - line.hits + line.walks + line.stolen_bases;
        fixed(extra / line.at_bats, 3)
    } else {
        ".000".to_string()
    }
}

/// David Smyth's BaseRuns estimate, A*B/(B+C)+D.
pub fn base_runs(line: &BattingLine) -> String {
    let a = line.hits + line.walks + line.hit_by_pitch - line.home_runs;
    let b = 1.4 * line.total_bases - 0.6 * line.hits + 3.0 * line.walks + line.hit_by_pitch;
    let c = line.at_bats - line.hits;
    let d = line.home_runs;

    if b + c > 0.0 {
        fixed(a * b / (b + c) + d, 1)
    } else {
        "0.0".to_string()
    }
}

/// AB + BB + HBP + SF + SH
pub fn plate_appearances(line: &BattingLine) -> f64 {
    line.at_bats + line.walks + line.hit_by_pitch + line.sac_flies + line.sac_hits
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rating {
    pub label: &'static str,
    pub tier: &'static str,
}

const ELITE: Rating = Rating { label: "Elite", tier: "A+" };
const EXCELLENT: Rating = Rating { label: "Excellent", tier: "A" };
const ABOVE_AVERAGE: Rating = Rating { label: "Above Average", tier: "B+" };
const AVERAGE: Rating = Rating { label: "Average", tier: "B" };
const BELOW_AVERAGE: Rating = Rating { label: "Below Average", tier: "C" };
const POOR: Rating = Rating { label: "Poor", tier: "D" };

pub fn ops_rating(ops: f64) -> Rating {
    match ops {
        o if o >= 0.900 => ELITE,
        o if o >= 0.800 => EXCELLENT,
        o if o >= 0.750 => ABOVE_AVERAGE,
        o if o >= 0.700 => AVERAGE,
        o if o >= 0.650 => BELOW_AVERAGE,
        _ => POOR,
    }
}

/// A missing (zero) ERA rates as poor.
pub fn era_rating(era: f64) -> Rating {
    let era = if era > 0.0 { era } else { 99.0 };
    match era {
        e if e <= 2.50 => ELITE,
        e if e <= 3.50 => EXCELLENT,
        e if e <= 4.00 => ABOVE_AVERAGE,
        e if e <= 4.50 => AVERAGE,
        e if e <= 5.00 => BELOW_AVERAGE,
        _ => POOR,
    }
}

/// Display a stat the way leaderboards print it.
pub fn format_stat(stat: &str, value: Option<f64>) -> String {
    let Some(value) = value else {
        return "-".to_string();
    };
    match stat {
        "AVG" | "OBP" | "SLG" | "OPS" | "wOBA" | "BABIP" | "ISO" => fixed(value, 3),
        s if s.ends_with('%') => format!("{}%", fixed(value * 100.0, 1)),
        "ERA" | "WHIP" | "FIP" => fixed(value, 2),
        "IP" => fixed(value, 1),
        _ => fixed(value.round(), 0),
    }
}

/// Position of `value` within `population`: the index of the first value at
/// least as large, as a share of the population. Empty population gives 50,
/// a value above everything gives 100.
pub fn percentile(value: f64, population: &[f64]) -> u32 {
    if population.is_empty() {
        return 50;
    }
    let mut sorted = population.to_vec();
    sorted.sort_by(f64::total_cmp);
    match sorted.iter().position(|v| *v >= value) {
        Some(index) => (index as f64 / sorted.len() as f64 * 100.0).round() as u32,
        None => 100,
    }
}

/// Share of the population strictly worse than `value`, 0-100.
pub fn percentile_rank(value: f64, population: &[f64], lower_is_better: bool) -> u32 {
    if population.is_empty() {
        return 0;
    }
    let worse = population
        .iter()
        .filter(|v| {
            if lower_is_better {
                **v > value
            } else {
                **v < value
            }
        })
        .count();
    (worse as f64 / population.len() as f64 * 100.0).round() as u32
}

/// Label bands used next to a percentile rank.
pub fn percentile_label(rank: u32) -> &'static str {
    match rank {
        90.. => "Elite",
        75..=89 => "Great",
        50..=74 => "Above Avg",
        25..=49 => "Below Avg",
        _ => "Poor",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trend {
    pub direction: Direction,
    /// Absolute change in percent of `previous`.
    pub change: f64,
}

impl Trend {
    pub fn is_positive(&self) -> bool {
        self.direction == Direction::Up
    }
}

/// Percent change between two values; a zero on either side is neutral.
pub fn trend_direction(current: f64, previous: f64) -> Trend {
    if current == 0.0 || previous == 0.0 {
        return Trend {
            direction: Direction::Neutral,
            change: 0.0,
        };
    }
    let change = (current - previous) / previous * 100.0;
    let direction = if change > 0.0 {
        Direction::Up
    } else if change < 0.0 {
        Direction::Down
    } else {
        Direction::Neutral
    };
    Trend {
        direction,
        change: round_to(change.abs(), 1),
    }
}

/// Trailing mean over `window` values. Positions before the first full
/// window are `None`; a series shorter than the window is returned as is.
pub fn rolling_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 || values.len() < window {
        return values.iter().copied().map(Some).collect();
    }
    (0..values.len())
        .map(|idx| {
            if idx + 1 < window {
                None
            } else {
                let slice = &values[idx + 1 - window..=idx];
                Some(slice.iter().sum::<f64>() / window as f64)
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Streak {
    pub hot: bool,
    pub cold: bool,
    pub games: usize,
    pub average: Option<f64>,
}

/// Hot or cold over the last ten games: mean at least 120% of `threshold`
/// is hot, at most 80% is cold.
pub fn identify_streaks(game_values: &[f64], threshold: f64) -> Streak {
    if game_values.is_empty() {
        return Streak {
            hot: false,
            cold: false,
            games: 0,
            average: None,
        };
    }
    let recent = &game_values[game_values.len().saturating_sub(10)..];
    let average = recent.iter().sum::<f64>() / recent.len() as f64;

    let (hot, cold) = if average >= threshold * 1.2 {
        (true, false)
    } else if average <= threshold * 0.8 {
        (false, true)
    } else {
        (false, false)
    };
    Streak {
        hot,
        cold,
        games: if hot || cold { recent.len() } else { 0 },
        average: Some(average),
    }
}

/// 100 minus the coefficient of variation, clamped to 0-100.
pub fn consistency(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if mean == 0.0 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let cv = variance.sqrt() / mean * 100.0;
    (100.0 - cv).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Benchmark {
    pub avg: f64,
    pub hr: f64,
    pub ops: f64,
}

/// League-typical AVG, HR and OPS for a fielding position. Unknown
/// positions use the right-field line.
pub fn position_benchmarks(position: &str) -> Benchmark {
    let (avg, hr, ops) = match position.trim().to_ascii_uppercase().as_str() {
        "C" => (0.240, 15.0, 0.720),
        "1B" => (0.265, 25.0, 0.800),
        "2B" => (0.260, 15.0, 0.750),
        "3B" => (0.255, 22.0, 0.775),
        "SS" => (0.255, 18.0, 0.760),
        "LF" => (0.260, 20.0, 0.780),
        "CF" => (0.265, 18.0, 0.770),
        "DH" => (0.260, 28.0, 0.820),
        _ => (0.265, 23.0, 0.790),
    };
    Benchmark { avg, hr, ops }
}
