//! Command handlers, one module per subcommand family.
//!
//! Each handler loads its view through [`common::CommandContext`], then
//! prints either a text table or JSON. Loaders are public so views can be
//! built without printing.

pub mod analysis;
pub mod available_stats;
pub mod common;
pub mod comparison;
pub mod games;
pub mod leaderboard;
pub mod news;
pub mod player;
pub mod player_comparison;
pub mod standings;
pub mod team;
pub mod transactions;
