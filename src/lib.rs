pub mod api;
pub mod cache;
pub mod config;
pub mod dx;
pub mod ens;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod services;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::cache::PortfolioCache;
use crate::config::AppConfig;
use crate::dx::DxClient;
use crate::ens::EnsClient;
use crate::services::{IdentityService, LeaderboardService, NameResolver, PortfolioService};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub cache: PortfolioCache,
    pub portfolio: PortfolioService,
    pub leaderboard: LeaderboardService,
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    /// Wire every component around one shared HTTP client and one cache.
    pub fn new(config: AppConfig, metrics_handle: PrometheusHandle) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout())
            .user_agent(concat!("dxdx/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let cache = PortfolioCache::new(config.cache_max_entries, config.cache_ttl());

        let dx = DxClient::with_base_url(http.clone(), &config.dx_api_url)
            .with_page_size(config.actions_page_size);
        let ens = EnsClient::with_base_url(http, &config.ens_api_url);

        let identity = IdentityService::new(ens.clone(), cache.clone());
        let leaderboard = LeaderboardService::new(
            dx.clone(),
            identity,
            cache.clone(),
            config.leaderboard_limit,
        );
        let portfolio = PortfolioService::new(dx, NameResolver::new(ens));

        Ok(Self {
            config,
            cache,
            portfolio,
            leaderboard,
            metrics_handle,
        })
    }
}
