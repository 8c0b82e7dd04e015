//! Common utilities and helper functions shared across commands.

use serde::Serialize;
use tracing::warn;

use crate::{
    api::{ApiService, ClientConfig},
    cli::types::Season,
    config::{Config, SeasonBounds},
    Result,
};

/// Context containing the resources every command needs
#[derive(Clone)]
pub struct CommandContext {
    pub api: ApiService,
    pub seasons: SeasonBounds,
}

impl CommandContext {
    pub fn new(api: ApiService, seasons: SeasonBounds) -> Self {
        Self { api, seasons }
    }

    /// Build the API client described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api = ApiService::new(ClientConfig::from_config(config))?;
        Ok(Self::new(api, config.seasons))
    }

    /// The requested season, or the default one, checked against the served range.
    pub fn season(&self, requested: Option<Season>) -> Result<Season> {
        self.seasons.resolve(requested)
    }
}

/// Pretty-print any serializable view to stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Keep a section's data, or log the failure and fall back to an empty one.
pub fn or_empty<T: Default>(section: &str, result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(section, error = %e, "Section unavailable");
            T::default()
        }
    }
}

/// Case-insensitive substring match against any of `fields`. An empty
/// needle matches everything.
pub fn matches_search(fields: &[&str], needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    needle.is_empty()
        || fields
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
}

/// Render rows under `headers` with every column padded to its widest cell.
/// The first column is left-aligned, the rest right-aligned.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(idx) {
                Some(width) => *width = (*width).max(len),
                None => widths.push(len),
            }
        }
    }

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                let width = widths[idx];
                if idx == 0 {
                    format!("{cell:<width$}")
                } else {
                    format!("{cell:>width$}")
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(headers));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    lines.extend(rows.iter().map(|row| format_row(row)));
    lines.join("\n")
}

/// Header cells from string literals.
pub fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}
