mod common;

use std::time::Duration;

use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dxdx::dx::DxClient;
use dxdx::models::portfolio::{group_actions_by_agent, sort_recent_first};

use common::{action_json, agent_json, dx_client, ens_client, mount_agents, ADDRESS};

#[tokio::test]
async fn test_get_agents_parses_payload() {
    let server = MockServer::start().await;
    mount_agents(
        &server,
        ADDRESS,
        json!([agent_json("a1", "Foxy", 300, &[("WEBCOIN", 120)])]),
    )
    .await;

    let agents = dx_client(&server).get_agents(ADDRESS).await.unwrap();

    assert_eq!(agents.len(), 1);
    let agent = &agents[0];
    assert_eq!(agent.id, "a1");
    assert_eq!(agent.agent_type.as_deref(), Some("trader"));
    assert_eq!(agent.persona.hobbies, vec!["chess".to_string()]);
    assert_eq!(agent.portfolio_value, Decimal::from(300));
    assert_eq!(agent.portfolio["WEBCOIN"], 120.0);
}

#[tokio::test]
async fn test_get_agents_null_data_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/players/{ADDRESS}/agents")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
        .mount(&server)
        .await;

    let agents = dx_client(&server).get_agents(ADDRESS).await.unwrap();
    assert!(agents.is_empty());
}

#[tokio::test]
async fn test_get_agents_missing_data_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/players/{ADDRESS}/agents")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .mount(&server)
        .await;

    let agents = dx_client(&server).get_agents(ADDRESS).await.unwrap();
    assert!(agents.is_empty());
}

#[tokio::test]
async fn test_get_actions_is_one_batched_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/agents/logs/actions"))
        .and(query_param("agent_ids", "a1,a2"))
        .and(query_param("limit", "1000"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                action_json("x1", "a1", "Twin", "2025-01-20T10:00:00Z"),
                action_json("x2", "a2", "Twin", "2025-01-20T12:00:00Z"),
                action_json("x3", "a1", "Twin", "2025-01-20T11:00:00Z"),
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ids = vec!["a1".to_string(), "a2".to_string()];
    let mut actions = dx_client(&server).get_actions(&ids).await.unwrap();
    assert_eq!(actions.len(), 3);
    assert_eq!(actions[0].details.token_symbol.as_deref(), Some("WEBCOIN"));

    // Same display name on both agents: grouping must still split by id.
    let grouped = group_actions_by_agent(&actions);
    assert_eq!(grouped["a1"].len(), 2);
    assert_eq!(grouped["a2"].len(), 1);

    sort_recent_first(&mut actions);
    let order: Vec<_> = actions.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(order, vec!["x2", "x3", "x1"]);
}

#[tokio::test]
async fn test_empty_id_lists_skip_the_network() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = dx_client(&server);
    assert!(client.get_actions(&[]).await.unwrap().is_empty());
    assert!(client.get_prompts(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_prompts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/agents/prompts"))
        .and(query_param("ids", "a1,a2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "prompts": { "a1": "buy low", "a2": "sell high" }
        })))
        .mount(&server)
        .await;

    let ids = vec!["a1".to_string(), "a2".to_string()];
    let prompts = dx_client(&server).get_prompts(&ids).await.unwrap();
    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts["a2"], "sell high");
}

#[tokio::test]
async fn test_page_size_is_configurable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/agents/logs/actions"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = DxClient::with_base_url(common::http(), server.uri()).with_page_size(50);
    let actions = client.get_actions(&["a1".to_string()]).await.unwrap();
    assert!(actions.is_empty());
}

#[tokio::test]
async fn test_price_history_sorted_oldest_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pools/WEBCOIN/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "timestamp": 300, "price": 0.03, "volume": 10 },
            { "timestamp": 100, "price": 0.01 },
            { "timestamp": 200, "price": 0.02 },
        ])))
        .mount(&server)
        .await;

    let points = dx_client(&server).get_price_history("WEBCOIN").await.unwrap();
    let stamps: Vec<_> = points.iter().map(|p| p.timestamp).collect();
    assert_eq!(stamps, vec![100, 200, 300]);
    assert_eq!(points[2].extra["volume"], json!(10));
}

#[tokio::test]
async fn test_server_error_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = dx_client(&server).get_agents(ADDRESS).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_malformed_body_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = dx_client(&server).get_agents(ADDRESS).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": [] }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let err = DxClient::with_base_url(http, server.uri())
        .get_agents(ADDRESS)
        .await
        .unwrap_err();
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_ens_lookup_found_and_not_found() {
    let server = MockServer::start().await;
    common::mount_ens_name(&server, "fivelines.eth", ADDRESS).await;
    Mock::given(method("GET"))
        .and(path("/nope.eth"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": true })))
        .mount(&server)
        .await;

    let client = ens_client(&server);

    let record = client.lookup("fivelines.eth").await.unwrap().unwrap();
    assert_eq!(record.address.as_deref(), Some(ADDRESS));
    assert_eq!(record.ens_name.as_deref(), Some("fivelines.eth"));
    assert_eq!(record.twitter.as_deref(), Some("fivelines"));

    assert!(client.lookup("nope.eth").await.unwrap().is_none());
}
