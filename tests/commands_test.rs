//! Integration tests for command handlers

use hanks_tank::{
    api::{Leaderboard, LeaderboardQuery, TransactionQuery},
    cli::types::{ComparisonKind, StatGroup},
    commands::{
        common::CommandContext,
        comparison::{compare_teams, handle_compare_seasons, SeasonComparisonParams, TeamComparisonParams},
        leaderboard::{handle_leaderboard, LeaderboardParams},
        news::handle_news,
        standings::handle_standings,
        transactions::{handle_transactions, TransactionParams},
    },
    Config, HanksTankError, Season, API_URL_ENV_VAR, DEFAULT_SEASON_ENV_VAR,
};
use serde_json::json;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn context_for(server: &MockServer) -> CommandContext {
    let uri = server.uri();
    let config = Config::from_lookup(|key| match key {
        k if k == API_URL_ENV_VAR => Some(uri.clone()),
        k if k == DEFAULT_SEASON_ENV_VAR => Some("2024".to_string()),
        _ => None,
    })
    .unwrap();
    CommandContext::from_config(&config).unwrap()
}

#[tokio::test]
async fn test_context_from_config_targets_backend() {
    let server = MockServer::start().await;
    let ctx = context_for(&server);
    assert_eq!(ctx.api.config().base_url, server.uri());
    assert_eq!(ctx.season(None).unwrap(), Season::new(2024));
}

#[tokio::test]
async fn test_player_leaderboard_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/player-batting"))
        .and(query_param("year", "2024"))
        .and(query_param("sortStat", "HR"))
        .and(query_param("direction", "desc"))
        .and(query_param("limit", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                {"Name": "Marcell Ozuna", "Team": "ATL", "HR": "39", "AVG": ".302", "OPS": 0.924},
                {"Name": "Matt Olson", "Team": "ATL", "HR": 29, "AVG": 0.247, "OPS": null}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context_for(&server);
    let params = |as_json| LeaderboardParams {
        board: Leaderboard::PlayerBatting,
        season: None,
        query: LeaderboardQuery {
            sort_stat: Some("HR".to_string()),
            direction: None,
            limit: Some(25),
        },
        search: None,
        as_json,
    };
    handle_leaderboard(&ctx, params(false)).await.unwrap();
    // Second view is served from the cache
    handle_leaderboard(&ctx, params(true)).await.unwrap();
}

#[tokio::test]
async fn test_out_of_range_season_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = context_for(&server);
    let result = handle_standings(&ctx, Some(Season::new(1998)), true).await;
    assert!(matches!(
        result,
        Err(HanksTankError::InvalidSeason { season: 1998, .. })
    ));
}

#[tokio::test]
async fn test_news_survives_refresh_failure_and_missing_sections() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/news/refresh"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/braves-news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "articles": [{"title": "Sale wins the Cy Young", "source": {"name": "MLB.com"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context_for(&server);
    assert!(handle_news(&ctx, false, true, false).await.is_ok());
}

#[tokio::test]
async fn test_transactions_with_date_range() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("startDate", "2024-07-01"))
        .and(query_param("endDate", "2024-07-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"person": {"fullName": "Jorge Soler"}, "typeDesc": "Trade",
             "fromTeam": {"name": "San Francisco Giants"}, "toTeam": {"name": "Atlanta Braves"},
             "date": "2024-07-30"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context_for(&server);
    let params = TransactionParams {
        query: TransactionQuery {
            team_id: None,
            start_date: Some("2024-07-01".parse().unwrap()),
            end_date: Some("2024-07-31".parse().unwrap()),
        },
        type_desc: Some("Trade".to_string()),
        as_json: false,
    };
    assert!(handle_transactions(&ctx, params).await.is_ok());
}

#[tokio::test]
async fn test_compare_seasons_prints_league_averages() {
    let server = MockServer::start().await;
    for (year, era) in [("2023", 4.20), ("2024", 3.95)] {
        Mock::given(method("GET"))
            .and(path("/team-pitching"))
            .and(query_param("year", year))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"Team": "ATL", "ERA": era, "IP": "1450.1", "SO": 1500},
                {"Team": "NYM", "ERA": era + 0.2, "IP": "1440.0", "SO": 1400}
            ])))
            .expect(1)
            .mount(&server)
            .await;
    }

    let ctx = context_for(&server);
    let params = SeasonComparisonParams {
        kind: ComparisonKind::LeaguePitching,
        seasons: vec![Season::new(2023), Season::new(2024)],
        stats: vec![],
        team: None,
        as_json: false,
    };
    assert!(handle_compare_seasons(&ctx, params).await.is_ok());
}

#[tokio::test]
async fn test_compare_teams_rejects_unknown_team() {
    let server = MockServer::start().await;
    let ctx = context_for(&server);
    let params = TeamComparisonParams {
        teams: vec!["ATL".to_string(), "Isotopes".to_string()],
        group: StatGroup::Batting,
        season: None,
        stats: vec![],
        as_json: true,
    };
    assert!(matches!(
        compare_teams(&ctx, &params).await,
        Err(HanksTankError::TeamNotFound { name }) if name == "Isotopes"
    ));
}
