//! Typed access to every backend and MLB Stats API resource.
//!
//! Each helper knows its path, its query parameters and how long its payload
//! may be served from cache.

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::{
    client::{ApiService, RequestOptions},
    types::{
        available_stat_names, Article, BattingRecord, Envelope, GameSummary, LiveFeed,
        NewsResponse, PitchingRecord, ScheduleResponse, StandingsResponse, StatcastPitch,
        TeamInfo, Transaction,
    },
};
use crate::{
    cli::types::{
        GameDate, GamePk, Handedness, PlayerId, PlayerRole, Season, SortDirection, StatGroup,
        TeamId,
    },
    error::{HanksTankError, Result},
};


pub const MLB_NEWS: &str = "/mlb-news";
pub const BRAVES_NEWS: &str = "/braves-news";

/// Cache lifetimes, in minutes.
pub mod ttl {
    pub const LEADERBOARD: u64 = 30;
    pub const STANDINGS: u64 = 10;
    pub const NEWS: u64 = 60;
    pub const AVAILABLE_STATS: u64 = 24 * 60;
    pub const PLAYER: u64 = 60;
    pub const STATCAST: u64 = 60;
    pub const TRANSACTIONS: u64 = 30;
    pub const TEAMS: u64 = 24 * 60;
    pub const TEAM_DETAILS: u64 = 60;
    pub const SCHEDULE: u64 = 2;
    pub const LIVE_FEED: u64 = 1;
}

/// Append URL-encoded query parameters to an endpoint path.
pub fn build_endpoint(path: &str, params: &[(&str, String)]) -> Result<String> {
    if params.is_empty() {
        return Ok(path.to_string());
    }
    let url = Url::parse_with_params(&format!("http://localhost{path}"), params).map_err(|e| {
        HanksTankError::Config {
            message: format!("invalid endpoint '{path}': {e}"),
        }
    })?;
    Ok(match url.query() {
        Some(query) if !query.is_empty() => format!("{}?{}", url.path(), query),
        _ => url.path().to_string(),
    })
}

/// The four backend leaderboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Leaderboard {
    TeamBatting,
    TeamPitching,
    PlayerBatting,
    PlayerPitching,
}

impl Leaderboard {
    pub fn path(&self) -> &'static str {
        match self {
            Leaderboard::TeamBatting => "/team-batting",
            Leaderboard::TeamPitching => "/team-pitching",
            Leaderboard::PlayerBatting => "/player-batting",
            Leaderboard::PlayerPitching => "/player-pitching",
        }
    }

    /// Name the backend uses for this leaderboard in `/available-stats`.
    pub fn data_type(&self) -> &'static str {
        self.path().trim_start_matches('/')
    }

    pub fn group(&self) -> StatGroup {
        match self {
            Leaderboard::TeamBatting | Leaderboard::PlayerBatting => StatGroup::Batting,
            Leaderboard::TeamPitching | Leaderboard::PlayerPitching => StatGroup::Pitching,
        }
    }

    pub fn is_team(&self) -> bool {
        matches!(self, Leaderboard::TeamBatting | Leaderboard::TeamPitching)
    }

    pub fn default_limit(&self) -> u32 {
        if self.is_team() {
            30
        } else {
            100
        }
    }

    pub fn team(group: StatGroup) -> Self {
        match group {
            StatGroup::Batting => Leaderboard::TeamBatting,
            StatGroup::Pitching => Leaderboard::TeamPitching,
        }
    }

    pub fn player(group: StatGroup) -> Self {
        match group {
            StatGroup::Batting => Leaderboard::PlayerBatting,
            StatGroup::Pitching => Leaderboard::PlayerPitching,
        }
    }
}

/// Server-side sort and limit for a leaderboard. Unset fields take the
/// leaderboard's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaderboardQuery {
    pub sort_stat: Option<String>,
    pub direction: Option<SortDirection>,
    pub limit: Option<u32>,
}

impl LeaderboardQuery {
    pub fn endpoint(&self, board: Leaderboard, season: Season) -> Result<String> {
        let group = board.group();
        let sort_stat = self
            .sort_stat
            .clone()
            .unwrap_or_else(|| group.default_sort_stat().to_string());
        let direction = self.direction.unwrap_or(group.default_direction());
        let limit = self.limit.unwrap_or(board.default_limit());

        build_endpoint(
            board.path(),
            &[
                ("year", season.to_string()),
                ("sortStat", sort_stat),
                ("direction", direction.to_string()),
                ("limit", limit.to_string()),
            ],
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatcastQuery {
    pub player_id: Option<PlayerId>,
    pub position: PlayerRole,
    pub p_throws: Option<Handedness>,
    pub stands: Option<Handedness>,
    pub events: Option<String>,
}

impl StatcastQuery {
    pub fn endpoint(&self, season: Season) -> Result<String> {
        let mut params = vec![
            ("year", season.to_string()),
            ("position", self.position.to_string()),
        ];
        if let Some(id) = self.player_id {
            params.push(("playerId", id.to_string()));
        }
        if let Some(hand) = self.p_throws {
            params.push(("p_throws", hand.as_str().to_string()));
        }
        if let Some(hand) = self.stands {
            params.push(("stands", hand.as_str().to_string()));
        }
        if let Some(events) = self.events.as_deref().filter(|e| !e.is_empty()) {
            params.push(("events", events.to_string()));
        }
        build_endpoint("/statcast", &params)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionQuery {
    pub team_id: Option<TeamId>,
    pub start_date: Option<GameDate>,
    pub end_date: Option<GameDate>,
}

impl TransactionQuery {
    pub fn is_empty(&self) -> bool {
        self.team_id.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }

    fn date_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(start) = self.start_date {
            params.push(("startDate", start.to_string()));
        }
        if let Some(end) = self.end_date {
            params.push(("endDate", end.to_string()));
        }
        params
    }

    pub fn endpoint(&self) -> Result<String> {
        let mut params = Vec::new();
        if let Some(team) = self.team_id {
            params.push(("teamId", team.to_string()));
        }
        params.extend(self.date_params());
        build_endpoint("/transactions", &params)
    }

    /// `/transactions/team/{id}[/breakdown]` with this query's date range.
    pub fn team_endpoint(&self, team_id: TeamId, breakdown: bool) -> Result<String> {
        let suffix = if breakdown { "/breakdown" } else { "" };
        build_endpoint(
            &format!("/transactions/team/{team_id}{suffix}"),
            &self.date_params(),
        )
    }
}

fn newest_first(mut articles: Vec<Article>) -> Vec<Article> {
    // Undated articles sort last
    articles.sort_by(|a, b| b.published().cmp(&a.published()));
    articles
}

impl ApiService {
    async fn fetch_list<T: DeserializeOwned>(&self, endpoint: &str, ttl: u64) -> Result<Vec<T>> {
        let envelope: Envelope<Vec<T>> = self
            .get_json(endpoint, RequestOptions::ttl_minutes(ttl))
            .await?;
        let rows = envelope.into_data()?;
        debug!(endpoint, rows = rows.len(), "Fetched rows");
        Ok(rows)
    }

    pub async fn team_batting(
        &self,
        season: Season,
        query: &LeaderboardQuery,
    ) -> Result<Vec<BattingRecord>> {
        let endpoint = query.endpoint(Leaderboard::TeamBatting, season)?;
        self.fetch_list(&endpoint, ttl::LEADERBOARD).await
    }

    pub async fn team_pitching(
        &self,
        season: Season,
        query: &LeaderboardQuery,
    ) -> Result<Vec<PitchingRecord>> {
        let endpoint = query.endpoint(Leaderboard::TeamPitching, season)?;
        self.fetch_list(&endpoint, ttl::LEADERBOARD).await
    }

    pub async fn player_batting(
        &self,
        season: Season,
        query: &LeaderboardQuery,
    ) -> Result<Vec<BattingRecord>> {
        let endpoint = query.endpoint(Leaderboard::PlayerBatting, season)?;
        self.fetch_list(&endpoint, ttl::LEADERBOARD).await
    }

    pub async fn player_pitching(
        &self,
        season: Season,
        query: &LeaderboardQuery,
    ) -> Result<Vec<PitchingRecord>> {
        let endpoint = query.endpoint(Leaderboard::PlayerPitching, season)?;
        self.fetch_list(&endpoint, ttl::LEADERBOARD).await
    }

    pub async fn standings(&self, season: Season) -> Result<StandingsResponse> {
        let endpoint = build_endpoint("/standings", &[("year", season.to_string())])?;
        self.get_json(&endpoint, RequestOptions::ttl_minutes(ttl::STANDINGS)).await
    }

    /// MLB headlines, newest first.
    pub async fn mlb_news(&self) -> Result<Vec<Article>> {
        let news: NewsResponse = self
            .get_json(MLB_NEWS, RequestOptions::ttl_minutes(ttl::NEWS))
            .await?;
        Ok(newest_first(news.articles))
    }

    /// Braves headlines, newest first.
    pub async fn braves_news(&self) -> Result<Vec<Article>> {
        let news: NewsResponse = self
            .get_json(BRAVES_NEWS, RequestOptions::ttl_minutes(ttl::NEWS))
            .await?;
        Ok(newest_first(news.articles))
    }

    /// Drop both cached news feeds and ask the backend to rebuild them.
    pub async fn refresh_news(&self) -> Result<Value> {
        self.invalidate(MLB_NEWS);
        self.invalidate(BRAVES_NEWS);
        info!("Requesting news refresh");
        self.post("/news/refresh", None, RequestOptions::default()).await
    }

    pub async fn available_stats(&self, data_type: &str) -> Result<Vec<String>> {
        let endpoint = build_endpoint("/available-stats", &[("dataType", data_type.to_string())])?;
        let payload = self.get(&endpoint, RequestOptions::ttl_minutes(ttl::AVAILABLE_STATS)).await?;
        Ok(available_stat_names(&payload))
    }

    pub async fn player_data(&self, player_id: PlayerId, position: PlayerRole) -> Result<Value> {
        let endpoint = build_endpoint(
            "/playerData",
            &[
                ("playerId", player_id.to_string()),
                ("position", position.to_string()),
            ],
        )?;
        self.get(&endpoint, RequestOptions::ttl_minutes(ttl::PLAYER)).await
    }

    pub async fn statcast(
        &self,
        season: Season,
        query: &StatcastQuery,
    ) -> Result<Vec<StatcastPitch>> {
        let endpoint = query.endpoint(season)?;
        self.fetch_list(&endpoint, ttl::STATCAST).await
    }

    pub async fn recent_transactions(&self) -> Result<Vec<Transaction>> {
        self.fetch_list("/transactions/recent", ttl::TRANSACTIONS).await
    }

    pub async fn transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>> {
        self.fetch_list(&query.endpoint()?, ttl::TRANSACTIONS).await
    }

    pub async fn team_transactions(
        &self,
        team_id: TeamId,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>> {
        self.fetch_list(&query.team_endpoint(team_id, false)?, ttl::TRANSACTIONS).await
    }

    /// Transaction counts per type for one team.
    pub async fn transaction_breakdown(
        &self,
        team_id: TeamId,
        query: &TransactionQuery,
    ) -> Result<BTreeMap<String, Value>> {
        let envelope: Envelope<BTreeMap<String, Value>> = self
            .get_json(
                &query.team_endpoint(team_id, true)?,
                RequestOptions::ttl_minutes(ttl::TRANSACTIONS),
            )
            .await?;
        envelope.into_data()
    }

    pub async fn teams(&self) -> Result<Vec<TeamInfo>> {
        self.fetch_list("/v2/teams", ttl::TEAMS).await
    }

    pub async fn team_details(&self, team_id: TeamId, season: Season) -> Result<Value> {
        let endpoint = build_endpoint(
            &format!("/v2/teams/{team_id}"),
            &[("season", season.to_string())],
        )?;
        let envelope: Envelope<Value> = self
            .get_json(&endpoint, RequestOptions::ttl_minutes(ttl::TEAM_DETAILS))
            .await?;
        envelope.into_data()
    }

    /// Every game scheduled on `date`, straight from the MLB Stats API.
    pub async fn games(&self, date: GameDate) -> Result<Vec<GameSummary>> {
        let url = format!(
            "{}/v1/schedule/games/?sportId=1&date={date}",
            self.config().mlb_api_url
        );
        let schedule: ScheduleResponse = self
            .get_json(&url, RequestOptions::ttl_minutes(ttl::SCHEDULE))
            .await?;
        Ok(schedule.into_games())
    }

    /// Live feed (linescore and boxscore) for one game.
    pub async fn game_details(&self, game_pk: GamePk) -> Result<LiveFeed> {
        let url = format!("{}/v1.1/game/{game_pk}/feed/live", self.config().mlb_api_url);
        self.get_json(&url, RequestOptions::ttl_minutes(ttl::LIVE_FEED)).await
    }
}
