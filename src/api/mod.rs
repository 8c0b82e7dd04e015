//! Backend and MLB Stats API access.
//!
//! [`client`] owns the transport policy (cache, de-duplication, retries),
//! [`endpoints`] knows the URL and cache lifetime of every resource, and
//! [`types`] holds the typed records payloads are parsed into.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{ApiService, ClientConfig, RequestOptions};
pub use endpoints::{Leaderboard, LeaderboardQuery, StatcastQuery, TransactionQuery};
pub use types::{
    Article, BattingLine, BattingRecord, GameSummary, LiveFeed, PitchingLine, PitchingRecord,
    StatRecord, TeamRecord, Transaction,
};
