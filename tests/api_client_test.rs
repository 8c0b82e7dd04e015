//! Integration tests for the API client through its public surface

use std::time::Duration;

use hanks_tank::{
    api::{LeaderboardQuery, StatRecord},
    ApiError, ApiService, CancelToken, ClientConfig, HanksTankError, Season,
};
use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

fn service(server: &MockServer) -> ApiService {
    ApiService::new(ClientConfig {
        retry_base_delay: Duration::from_millis(10),
        ..ClientConfig::with_base_url(server.uri())
    })
    .unwrap()
}

#[tokio::test]
async fn test_refresh_news_drops_cached_feeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mlb-news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "articles": [{"title": "Opening Day"}]
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/news/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let api = service(&server);
    assert_eq!(api.mlb_news().await.unwrap().len(), 1);
    assert_eq!(api.mlb_news().await.unwrap().len(), 1);

    api.refresh_news().await.unwrap();
    assert_eq!(api.mlb_news().await.unwrap()[0].title, "Opening Day");
}

#[tokio::test]
async fn test_leaderboards_parse_mixed_cells() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/team-pitching"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"Tm": "ATL", "ERA": "3.86", "IP": 1446.2, "SO": null, "WAR": "21.4"}]
        })))
        .mount(&server)
        .await;

    let api = service(&server);
    let rows = api
        .team_pitching(Season::new(2024), &LeaderboardQuery::default())
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].team(), "ATL");
    assert_eq!(rows[0].stat("ERA"), Some(3.86));
    assert_eq!(rows[0].stat("SO"), Some(0.0));
    assert_eq!(rows[0].stat("WAR"), Some(21.4));
}

#[tokio::test]
async fn test_unsuccessful_envelope_is_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/transactions/recent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "data": []
        })))
        .mount(&server)
        .await;

    let api = service(&server);
    assert!(matches!(
        api.recent_transactions().await,
        Err(HanksTankError::NoData)
    ));
}

#[tokio::test]
async fn test_cancelled_service_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"articles": []})))
        .expect(0)
        .mount(&server)
        .await;

    let token = CancelToken::new();
    token.cancel();
    let api = service(&server).with_cancel(token);
    assert!(matches!(
        api.braves_news().await,
        Err(HanksTankError::Api(ApiError::Cancelled { .. }))
    ));
}

#[tokio::test]
async fn test_cancel_interrupts_slow_standings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/standings"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"records": []}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let token = CancelToken::new();
    let api = service(&server).with_cancel(token.clone());
    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });

    let started = std::time::Instant::now();
    let result = api.standings(Season::new(2024)).await;
    canceller.await.unwrap();

    assert!(matches!(
        result,
        Err(HanksTankError::Api(ApiError::Cancelled { .. }))
    ));
    assert!(started.elapsed() < Duration::from_secs(2));
}
