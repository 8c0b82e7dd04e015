//! Stat formulas, derived columns and aggregates over leaderboard rows.

pub mod derived;
pub mod formulas;

use std::collections::BTreeMap;

use crate::api::types::StatRecord;

pub use derived::{enrich_batting, enrich_pitching};
pub use formulas::{format_stat, is_lower_better, percentile, percentile_rank};

/// Every row's value for `key`, skipping rows without the column.
pub fn column<R: StatRecord>(records: &[R], key: &str) -> Vec<f64> {
    records.iter().filter_map(|r| r.stat(key)).collect()
}

/// Mean of each numeric column across `records`, over the rows that carry it.
pub fn league_averages<R: StatRecord>(records: &[R]) -> BTreeMap<String, f64> {
    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for record in records {
        for (key, value) in record.numeric_stats() {
            let entry = sums.entry(key).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }
    sums.into_iter()
        .map(|(key, (sum, count))| (key, sum / count as f64))
        .collect()
}
