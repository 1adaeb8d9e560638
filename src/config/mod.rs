use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::dx::{DEFAULT_PAGE_SIZE, DX_API_BASE};
use crate::ens::ENS_API_BASE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    // Upstreams
    pub dx_api_url: String,
    pub ens_api_url: String,
    pub upstream_timeout_secs: u64,
    pub actions_page_size: u32,

    // Cache
    pub cache_max_entries: u64,
    pub cache_ttl_secs: u64,

    // Leaderboard
    pub leaderboard_limit: u32,
    pub leaderboard_top: usize,

    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            dx_api_url: DX_API_BASE.into(),
            ens_api_url: ENS_API_BASE.into(),
            upstream_timeout_secs: 5,
            actions_page_size: DEFAULT_PAGE_SIZE,
            cache_max_entries: 500,
            cache_ttl_secs: 300,
            leaderboard_limit: 25,
            leaderboard_top: 8,
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Unset variables fall
    /// back to defaults; set-but-malformed numbers are an error.
    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_format = match var("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => anyhow::bail!("LOG_FORMAT must be `pretty` or `json`, got `{other}`"),
        };

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: parse_or(&var, "PORT", defaults.port)?,
            dx_api_url: var("DX_API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.dx_api_url),
            ens_api_url: var("ENS_API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.ens_api_url),
            upstream_timeout_secs: parse_or(
                &var,
                "UPSTREAM_TIMEOUT_SECS",
                defaults.upstream_timeout_secs,
            )?,
            actions_page_size: parse_or(&var, "ACTIONS_PAGE_SIZE", defaults.actions_page_size)?,
            cache_max_entries: parse_or(&var, "CACHE_MAX_ENTRIES", defaults.cache_max_entries)?,
            cache_ttl_secs: parse_or(&var, "CACHE_TTL_SECS", defaults.cache_ttl_secs)?,
            leaderboard_limit: parse_or(&var, "LEADERBOARD_LIMIT", defaults.leaderboard_limit)?,
            leaderboard_top: parse_or(&var, "LEADERBOARD_TOP", defaults.leaderboard_top)?,
            log_format,
        })
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

fn parse_or<F, T>(var: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match var(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{key} is not valid ({raw}): {e}")),
    }
}
