//! Player detail and statcast pitch-mix commands.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::common::{headers, print_json, render_table, CommandContext};
use crate::{
    api::{types::StatcastPitch, StatcastQuery},
    cli::types::{PlayerId, PlayerRole, Season},
    stats::formulas::{fixed, round_to},
    Result,
};

/// Handle the `player` command. The detail payload is passed through as is.
pub async fn handle_player(
    ctx: &CommandContext,
    player_id: PlayerId,
    role: PlayerRole,
) -> Result<()> {
    let data = ctx.api.player_data(player_id, role).await?;
    print_json(&data)
}

/// Usage and velocity of one pitch type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchMix {
    pub pitch_type: String,
    pub count: usize,
    /// Share of all pitches, 0-1.
    pub usage: f64,
    /// Mean release speed over pitches that report one.
    pub avg_velocity: Option<f64>,
}

/// Group pitches by type, most used first. Untyped pitches count as `UN`.
pub fn pitch_mix(pitches: &[StatcastPitch]) -> Vec<PitchMix> {
    let mut groups: BTreeMap<String, (usize, f64, usize)> = BTreeMap::new();
    for pitch in pitches {
        let kind = pitch
            .pitch_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("UN")
            .to_string();
        let entry = groups.entry(kind).or_insert((0, 0.0, 0));
        entry.0 += 1;
        if pitch.release_speed > 0.0 {
            entry.1 += pitch.release_speed;
            entry.2 += 1;
        }
    }

    let total = pitches.len().max(1) as f64;
    let mut mix: Vec<PitchMix> = groups
        .into_iter()
        .map(|(pitch_type, (count, speed_sum, timed))| PitchMix {
            pitch_type,
            count,
            usage: round_to(count as f64 / total, 3),
            avg_velocity: (timed > 0).then(|| round_to(speed_sum / timed as f64, 1)),
        })
        .collect();
    mix.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.pitch_type.cmp(&b.pitch_type)));
    mix
}

pub struct StatcastParams {
    pub season: Option<Season>,
    pub query: StatcastQuery,
    pub as_json: bool,
}

/// Handle the `statcast` command
pub async fn handle_statcast(ctx: &CommandContext, params: StatcastParams) -> Result<()> {
    let season = ctx.season(params.season)?;
    let pitches = ctx.api.statcast(season, &params.query).await?;
    let mix = pitch_mix(&pitches);
    debug!(pitches = pitches.len(), types = mix.len(), "Statcast loaded");

    if params.as_json {
        return print_json(&mix);
    }
    if mix.is_empty() {
        println!("No statcast pitches for {season}.");
        return Ok(());
    }
    let body: Vec<Vec<String>> = mix
        .iter()
        .map(|m| {
            vec![
                m.pitch_type.clone(),
                m.count.to_string(),
                format!("{}%", fixed(m.usage * 100.0, 1)),
                m.avg_velocity
                    .map(|v| fixed(v, 1))
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    println!("Pitch mix {season} ({} pitches)", pitches.len());
    println!("{}", render_table(&headers(&["Pitch", "Count", "Usage", "Velo"]), &body));
    Ok(())
}
