//! Stat columns the backend can sort and filter by.

use tracing::debug;

use super::common::{print_json, CommandContext};
use crate::{api::Leaderboard, error::HanksTankError, Result};

const BOARDS: [Leaderboard; 4] = [
    Leaderboard::TeamBatting,
    Leaderboard::TeamPitching,
    Leaderboard::PlayerBatting,
    Leaderboard::PlayerPitching,
];

/// Resolve a `--data-type` value to its leaderboard.
pub fn parse_data_type(data_type: &str) -> Result<Leaderboard> {
    let wanted = data_type.trim().trim_start_matches('/');
    BOARDS
        .into_iter()
        .find(|board| board.data_type().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| HanksTankError::Config {
            message: format!(
                "unknown data type '{data_type}', expected one of: {}",
                BOARDS.map(|b| b.data_type()).join(", ")
            ),
        })
}

/// Handle the `stats-available` command
pub async fn handle_stats_available(
    ctx: &CommandContext,
    data_type: &str,
    as_json: bool,
) -> Result<()> {
    let board = parse_data_type(data_type)?;
    let stats = ctx.api.available_stats(board.data_type()).await?;
    debug!(data_type = board.data_type(), count = stats.len(), "Available stats loaded");

    if as_json {
        return print_json(&stats);
    }
    if stats.is_empty() {
        println!("No stats reported for {}.", board.data_type());
        return Ok(());
    }
    println!("{} ({} stats)", board.data_type(), stats.len());
    for chunk in stats.chunks(8) {
        println!("  {}", chunk.join("  "));
    }
    Ok(())
}
