use std::time::Instant;

use metrics::{counter, histogram};
use reqwest::{Client, Url};
use thiserror::Error;

use crate::models::IdentityRecord;

pub const ENS_API_BASE: &str = "https://api.ensdata.net";

#[derive(Debug, Error)]
pub enum EnsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

/// Client for the public ENS data service. The same endpoint answers both
/// directions: a name yields its address, an address yields its profile.
#[derive(Debug, Clone)]
pub struct EnsClient {
    http: Client,
    base_url: String,
}

impl EnsClient {
    pub fn with_base_url(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Look up a name or address. Any non-success status means the registry
    /// has no record for it and yields `Ok(None)`; only transport and decode
    /// failures are errors.
    pub async fn lookup(&self, name_or_address: &str) -> Result<Option<IdentityRecord>, EnsError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| EnsError::Unexpected(format!("bad base url {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| EnsError::Unexpected(format!("base url cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .push(name_or_address);

        counter!("upstream_requests_total", "endpoint" => "ens").increment(1);
        let started = Instant::now();

        let result = async {
            let resp = self.http.get(url).send().await?;
            let status = resp.status();
            if !status.is_success() {
                tracing::debug!(query = name_or_address, %status, "ENS record not found");
                return Ok(None);
            }
            let record: IdentityRecord = resp.json().await?;
            Ok::<_, EnsError>(Some(record))
        }
        .await;

        histogram!("upstream_latency_seconds", "endpoint" => "ens")
            .record(started.elapsed().as_secs_f64());
        if let Err(e) = &result {
            counter!("upstream_failures_total", "endpoint" => "ens").increment(1);
            tracing::warn!(query = name_or_address, error = %e, "ENS lookup failed");
        }

        result
    }
}

