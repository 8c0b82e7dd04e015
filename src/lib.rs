//! Hank's Tank MLB statistics client
//!
//! Team and player leaderboards, standings, news, schedules, box scores,
//! transactions and comparisons, read from the Hank's Tank backend and the
//! public MLB Stats API.
//!
//! ## Features
//!
//! - **HTTP client**: per-endpoint response cache, request de-duplication,
//!   retries with exponential backoff and cancellation
//! - **Typed records**: lenient parsing of backend rows into batting and
//!   pitching records
//! - **Stat formulas**: wOBA, ISO, BABIP, BaseRuns, percentiles, trends and
//!   streaks
//! - **Views**: leaderboard, standings, home, scoreboard, box score,
//!   transaction and comparison commands
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hanks_tank::{api::{ApiService, ClientConfig, LeaderboardQuery}, Season};
//!
//! # async fn example() -> hanks_tank::Result<()> {
//! let api = ApiService::new(ClientConfig::default())?;
//! let rows = api
//!     .team_batting(Season::new(2024), &LeaderboardQuery::default())
//!     .await?;
//! println!("{} teams", rows.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export HANKS_TANK_API_URL=http://localhost:8080/api
//! export HANKS_TANK_DEFAULT_SEASON=2025
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod stats;
pub mod teams;

// Re-export commonly used types
pub use api::{ApiService, ClientConfig, RequestOptions};
pub use cli::types::{GameDate, GamePk, PlayerId, Season, TeamId};
pub use config::Config;
pub use crate::core::CancelToken;
pub use error::{ApiError, HanksTankError, Result};

/// Backend base URL override.
pub const API_URL_ENV_VAR: &str = "HANKS_TANK_API_URL";
/// Set to `false` to disable response caching.
pub const CACHE_ENV_VAR: &str = "HANKS_TANK_CACHE";
pub const DEFAULT_SEASON_ENV_VAR: &str = "HANKS_TANK_DEFAULT_SEASON";
pub const MIN_SEASON_ENV_VAR: &str = "HANKS_TANK_MIN_SEASON";
pub const MAX_SEASON_ENV_VAR: &str = "HANKS_TANK_MAX_SEASON";
