//! Team lookup and detail.

use serde_json::Value;
use tracing::debug;

use super::common::{print_json, CommandContext};
use crate::{
    api::types::TeamInfo,
    cli::types::{Season, TeamId},
    error::HanksTankError,
    teams, Result,
};

/// Backend team matching an id, abbreviation or name.
pub fn find_team<'a>(all: &'a [TeamInfo], query: &str) -> Result<&'a TeamInfo> {
    let query = query.trim();
    if let Ok(id) = query.parse::<u64>() {
        if let Some(team) = all.iter().find(|t| t.id == Some(id)) {
            return Ok(team);
        }
    }
    let known = teams::lookup(query).ok();
    all.iter()
        .find(|t| {
            t.abbreviation
                .as_deref()
                .is_some_and(|a| a.eq_ignore_ascii_case(query))
                || t.name.eq_ignore_ascii_case(query)
                || known.is_some_and(|k| teams::is_team_cell(k, &t.name))
        })
        .ok_or_else(|| HanksTankError::TeamNotFound {
            name: query.to_string(),
        })
}

/// Top-level scalar fields of a detail payload, for the text view.
pub fn scalar_fields(details: &Value) -> Vec<(String, String)> {
    let Value::Object(map) = details else {
        return Vec::new();
    };
    map.iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key.clone(), s.clone())),
            Value::Number(n) => Some((key.clone(), n.to_string())),
            Value::Bool(b) => Some((key.clone(), b.to_string())),
            _ => None,
        })
        .collect()
}

/// Handle the `team` command
pub async fn handle_team(
    ctx: &CommandContext,
    query: &str,
    season: Option<Season>,
    as_json: bool,
) -> Result<()> {
    let season = ctx.season(season)?;
    let all = ctx.api.teams().await?;
    let team = find_team(&all, query)?;
    let id = team.id.ok_or_else(|| HanksTankError::TeamNotFound {
        name: team.name.clone(),
    })?;
    let team_id = TeamId::new(u32::try_from(id).map_err(|_| HanksTankError::TeamNotFound {
        name: team.name.clone(),
    })?);
    debug!(%team_id, %season, "Loading team details");

    let details = ctx.api.team_details(team_id, season).await?;
    if as_json {
        return print_json(&details);
    }
    println!("{} ({season})", team.name);
    for (key, value) in scalar_fields(&details) {
        println!("  {key:<20} {value}");
    }
    Ok(())
}
