//! Fill in advanced columns the backend left out.
//!
//! A column counts as missing when it is absent or zero. Percent columns are
//! fractions (`0.234`), matching what the backend sends.

use crate::api::types::{BattingRecord, PitchingRecord, StatRecord};

use super::formulas::round_to;

/// League-average OPS used to scale the wRC+ approximation.
pub const LEAGUE_OPS: f64 = 0.730;

/// Baseball innings notation to true innings: `180.1` is 180 1/3.
pub fn innings(ip: f64) -> f64 {
    let whole = ip.trunc();
    let outs = ((ip - whole) * 10.0).round();
    whole + outs / 3.0
}

pub fn enrich_batting(record: &mut BattingRecord) {
    let line = record.line.clone();

    if !record.has_stat("ISO") && line.slg != 0.0 && line.avg != 0.0 {
        record.set_stat("ISO", round_to(line.slg - line.avg, 3));
    }
    if !record.has_stat("wOBA") {
        record.set_stat("wOBA", line.obp);
    }
    if !record.has_stat("wRC+") {
        record.set_stat("wRC+", (line.ops / LEAGUE_OPS * 100.0).round());
    }
    if line.plate_appearances > 0.0 {
        if !record.has_stat("K%") && line.strikeouts > 0.0 {
            let k = line.strikeouts / line.plate_appearances;
            record.set_stat("K%", round_to(k, 3));
        }
        if !record.has_stat("BB%") && line.walks > 0.0 {
            let bb = line.walks / line.plate_appearances;
            record.set_stat("BB%", round_to(bb, 3));
        }
    }
    let attempts = line.stolen_bases + line.caught_stealing;
    if !record.has_stat("SB%") && line.stolen_bases > 0.0 && line.caught_stealing > 0.0 {
        record.set_stat("SB%", round_to(line.stolen_bases / attempts, 3));
    }
}

pub fn enrich_pitching(record: &mut PitchingRecord) {
    let line = record.line.clone();
    let ip = innings(line.innings_pitched);

    if ip > 0.0 {
        for (key, count) in [
            ("K/9", line.strikeouts),
            ("BB/9", line.walks),
            ("HR/9", line.home_runs),
        ] {
            if !record.has_stat(key) && count > 0.0 {
                record.set_stat(key, round_to(count / ip * 9.0, 2));
            }
        }
    }
    if line.batters_faced > 0.0 {
        for (key, count) in [("K%", line.strikeouts), ("BB%", line.walks)] {
            if !record.has_stat(key) && count > 0.0 {
                record.set_stat(key, round_to(count / line.batters_faced, 3));
            }
        }
    }
    if !record.has_stat("K-BB%") && record.has_stat("K%") && record.has_stat("BB%") {
        let diff = record.stat_or_zero("K%") - record.stat_or_zero("BB%");
        record.set_stat("K-BB%", round_to(diff, 3));
    }
    // FIP needs league constants; fall back to ERA, and xFIP to FIP
    if !record.has_stat("FIP") {
        record.set_stat("FIP", line.era);
    }
    if !record.has_stat("xFIP") {
        let fip = record.stat_or_zero("FIP");
        record.set_stat("xFIP", fip);
    }
}
