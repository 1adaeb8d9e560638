use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dxdx::cache::PortfolioCache;
use dxdx::config::AppConfig;
use dxdx::dx::DxClient;
use dxdx::ens::EnsClient;

/// A checksummed address that owns agents in the fixtures.
#[allow(dead_code)]
pub const ADDRESS: &str = "0x5dC5E4c884e0719d07122333d0558aBa5Cd670A6";

/// Deterministic lowercase player address for leaderboard fixtures.
#[allow(dead_code)]
pub fn player(n: u32) -> String {
    format!("0x{n:040x}")
}

#[allow(dead_code)]
pub fn http() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .expect("Failed to build HTTP client")
}

#[allow(dead_code)]
pub fn dx_client(server: &MockServer) -> DxClient {
    DxClient::with_base_url(http(), server.uri())
}

#[allow(dead_code)]
pub fn ens_client(server: &MockServer) -> EnsClient {
    EnsClient::with_base_url(http(), server.uri())
}

#[allow(dead_code)]
pub fn fresh_cache() -> PortfolioCache {
    PortfolioCache::new(500, Duration::from_secs(300))
}

#[allow(dead_code)]
pub fn test_config(dx: &MockServer, ens: &MockServer) -> AppConfig {
    AppConfig {
        dx_api_url: dx.uri(),
        ens_api_url: ens.uri(),
        upstream_timeout_secs: 2,
        ..AppConfig::default()
    }
}

#[allow(dead_code)]
pub fn agent_json(id: &str, name: &str, value: i64, holdings: &[(&str, i64)]) -> Value {
    let portfolio: serde_json::Map<String, Value> = holdings
        .iter()
        .map(|(symbol, amount)| (symbol.to_string(), json!(amount)))
        .collect();

    json!({
        "id": id,
        "name": name,
        "type": "trader",
        "condition": "healthy",
        "company_id": "c1",
        "player_id": ADDRESS,
        "location_id": "loc-1",
        "energy": 80,
        "persona": {
            "animal": "fox",
            "gender": "female",
            "hobbies": ["chess"],
            "age_range": "30-40",
            "occupation": "analyst"
        },
        "last_action_timestamp": 1_737_374_400,
        "last_action_time_ago": "2h ago",
        "decide_model": "model-a",
        "message_model": "model-b",
        "decide_temp": 0.7,
        "message_temp": 0.9,
        "portfolio_value": value,
        "portfolio": portfolio,
        "image_url": format!("https://img.example/{id}.png"),
        "nugget_url": null,
        "card_url": null
    })
}

#[allow(dead_code)]
pub fn action_json(id: &str, agent_id: &str, agent_name: &str, timestamp: &str) -> Value {
    json!({
        "id": id,
        "agent_id": agent_id,
        "agent_name": agent_name,
        "action_timestamp": timestamp,
        "action_type": "trade",
        "reasoning": "momentum looks good",
        "details": {
            "type": "buy",
            "amount_in": 10,
            "amount_out": 250,
            "price_after": 0.04,
            "token_symbol": "WEBCOIN"
        },
        "location_id": "loc-1",
        "created_at": timestamp
    })
}

#[allow(dead_code)]
pub async fn mount_agents(server: &MockServer, address: &str, agents: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/players/{address}/agents")))
        .and(query_param("limit", "1000"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": agents })))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mount_ens_name(server: &MockServer, name: &str, address: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/{name}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "address": address,
            "ens": name,
            "avatar": format!("https://metadata.ens.domains/mainnet/avatar/{name}"),
            "twitter": "fivelines"
        })))
        .mount(server)
        .await;
}
