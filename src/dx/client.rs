use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{ApiLeaderboardEntry, DataEnvelope, PricePoint, PromptsEnvelope};
use crate::models::{Action, Agent, Prompts};

pub const DX_API_BASE: &str = "https://dx2-public-api-aadnt.ondigitalocean.app/public/v1";

/// Single page large enough to cover every agent an account can own, so the
/// batched endpoints never need a second request.
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Unexpected(String),

    /// One failure handed to several callers that waited on the same load.
    #[error(transparent)]
    Shared(#[from] Arc<UpstreamError>),
}

impl UpstreamError {
    pub fn is_timeout(&self) -> bool {
        match self {
            UpstreamError::Http(e) => e.is_timeout(),
            UpstreamError::Unexpected(_) => false,
            UpstreamError::Shared(inner) => inner.is_timeout(),
        }
    }
}

/// Read-only client for the DX terminal public API.
#[derive(Debug, Clone)]
pub struct DxClient {
    http: Client,
    base_url: String,
    page_size: u32,
}

impl DxClient {
    pub fn with_base_url(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Fetch every agent owned by a player. A player with no agents (or an
    /// unknown player) yields an empty list.
    pub async fn get_agents(&self, address: &str) -> Result<Vec<Agent>, UpstreamError> {
        let mut url = self.endpoint(&["players", address, "agents"])?;
        url.query_pairs_mut()
            .append_pair("limit", &self.page_size.to_string())
            .append_pair("offset", "0");

        let envelope: DataEnvelope<Agent> = self.get_json("agents", url).await?;
        Ok(envelope.into_vec())
    }

    /// Fetch logged actions across all given agents in one batched call.
    pub async fn get_actions(&self, agent_ids: &[String]) -> Result<Vec<Action>, UpstreamError> {
        if agent_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut url = self.endpoint(&["agents", "logs", "actions"])?;
        url.query_pairs_mut()
            .append_pair("agent_ids", &agent_ids.join(","))
            .append_pair("limit", &self.page_size.to_string())
            .append_pair("offset", "0");

        let envelope: DataEnvelope<Action> = self.get_json("actions", url).await?;
        Ok(envelope.into_vec())
    }

    /// Fetch the current operating prompt of each given agent.
    pub async fn get_prompts(&self, agent_ids: &[String]) -> Result<Prompts, UpstreamError> {
        if agent_ids.is_empty() {
            return Ok(Prompts::new());
        }

        let mut url = self.endpoint(&["agents", "prompts"])?;
        url.query_pairs_mut().append_pair("ids", &agent_ids.join(","));

        let envelope: PromptsEnvelope = self.get_json("prompts", url).await?;
        Ok(envelope.prompts.unwrap_or_default())
    }

    /// Fetch the top `limit` players, in upstream rank order.
    pub async fn get_leaderboard(
        &self,
        limit: u32,
    ) -> Result<Vec<ApiLeaderboardEntry>, UpstreamError> {
        let mut url = self.endpoint(&["players", "leaderboard"])?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());

        let envelope: DataEnvelope<ApiLeaderboardEntry> =
            self.get_json("leaderboard", url).await?;
        Ok(envelope.into_vec())
    }

    /// Fetch a pool's price history, oldest point first.
    pub async fn get_price_history(&self, asset: &str) -> Result<Vec<PricePoint>, UpstreamError> {
        let url = self.endpoint(&["pools", asset, "history"])?;

        let mut points: Vec<PricePoint> = self.get_json("price_history", url).await?;
        points.sort_by_key(|p| p.timestamp);
        Ok(points)
    }

    /// Base URL plus path segments. Segments are percent-encoded, so
    /// user-supplied values cannot escape their position in the path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| UpstreamError::Unexpected(format!("bad base url {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| UpstreamError::Unexpected(format!("base url cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: Url,
    ) -> Result<T, UpstreamError> {
        counter!("upstream_requests_total", "endpoint" => endpoint).increment(1);
        let started = Instant::now();

        let result = async {
            let resp = self.http.get(url).send().await?.error_for_status()?;
            let body: T = resp.json().await?;
            Ok::<T, UpstreamError>(body)
        }
        .await;

        let elapsed = started.elapsed();
        histogram!("upstream_latency_seconds", "endpoint" => endpoint)
            .record(elapsed.as_secs_f64());

        match &result {
            Ok(_) => tracing::debug!(endpoint, elapsed_ms = elapsed.as_millis() as u64, "DX request ok"),
            Err(e) => {
                counter!("upstream_failures_total", "endpoint" => endpoint).increment(1);
                tracing::warn!(
                    endpoint,
                    error = %e,
                    timeout = e.is_timeout(),
                    "DX request failed"
                );
            }
        }

        result
    }
}
