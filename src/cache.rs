use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use metrics::{counter, gauge};
use moka::future::Cache;
use moka::policy::EvictionPolicy;

use crate::models::{IdentityRecord, LeaderboardEntry};

pub const DEFAULT_MAX_ENTRIES: u64 = 500;
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Cache key for the aggregated leaderboard of a given size.
pub fn leaderboard_key(limit: u32) -> String {
    format!("leaderboard?limit={limit}")
}

/// Cache key for an account's identity record. Addresses are case-insensitive.
pub fn identity_key(account: &str) -> String {
    format!("identity:{}", account.trim().to_lowercase())
}

/// Cached value wrapper
#[derive(Debug, Clone, PartialEq)]
pub enum CacheValue {
    Leaderboard(Vec<LeaderboardEntry>),
    /// `None` records a lookup that found no identity.
    Identity(Option<IdentityRecord>),
}

impl CacheValue {
    fn kind(&self) -> &'static str {
        match self {
            CacheValue::Leaderboard(_) => "leaderboard",
            CacheValue::Identity(_) => "identity",
        }
    }
}

/// Bounded, time-expiring store shared by every data-access component.
///
/// Entries are evicted least-recently-used once `max_entries` is exceeded and
/// read as absent once older than the TTL. Clones share the same storage.
#[derive(Clone)]
pub struct PortfolioCache {
    cache: Cache<String, CacheValue>,
}

impl fmt::Debug for PortfolioCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortfolioCache")
            .field("stats", &self.stats())
            .finish()
    }
}

impl Default for PortfolioCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, DEFAULT_TTL)
    }
}

impl PortfolioCache {
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .eviction_policy(EvictionPolicy::lru())
            .build();

        Self { cache }
    }

    pub async fn get(&self, key: &str) -> Option<CacheValue> {
        self.cache.get(key).await
    }

    /// Stores `value` and applies eviction before returning, so the entry
    /// count never sits above `max_entries` and the least-recently-used
    /// entry is the one dropped.
    pub async fn set(&self, key: impl Into<String>, value: CacheValue) {
        let key = key.into();
        tracing::trace!(%key, kind = value.kind(), "cache set");
        self.cache.insert(key, value).await;
        self.settle().await;
    }

    /// Return the cached leaderboard aggregate or build it with `load`.
    ///
    /// Concurrent callers that miss together share one `load`; the others
    /// wait for its result. Failed loads are not stored, and every waiter
    /// receives the same shared error.
    pub async fn get_or_load_leaderboard<F, E>(
        &self,
        limit: u32,
        load: F,
    ) -> Result<Vec<LeaderboardEntry>, Arc<E>>
    where
        F: Future<Output = Result<Vec<LeaderboardEntry>, E>>,
        E: Send + Sync + 'static,
    {
        let key = leaderboard_key(limit);
        let entry = self
            .cache
            .entry_by_ref(key.as_str())
            .or_try_insert_with(async { load.await.map(CacheValue::Leaderboard) })
            .await?;

        let fresh = entry.is_fresh();
        record_lookup("leaderboard", !fresh);
        if fresh {
            self.settle().await;
        }

        match entry.into_value() {
            CacheValue::Leaderboard(entries) => Ok(entries),
            other => {
                tracing::warn!(%key, kind = other.kind(), "leaderboard key holds another kind");
                Ok(Vec::new())
            }
        }
    }

    /// Outer `None` is a miss; `Some(None)` is a cached "no identity".
    pub async fn get_identity(&self, account: &str) -> Option<Option<IdentityRecord>> {
        let hit = match self.get(&identity_key(account)).await {
            Some(CacheValue::Identity(record)) => Some(record),
            _ => None,
        };
        record_lookup("identity", hit.is_some());
        hit
    }

    pub async fn set_identity(&self, account: &str, record: Option<IdentityRecord>) {
        self.set(identity_key(account), CacheValue::Identity(record))
            .await;
    }

    /// Apply buffered evictions and bookkeeping now instead of lazily.
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }

    async fn settle(&self) {
        self.cache.run_pending_tasks().await;
        gauge!("cache_entries").set(self.cache.entry_count() as f64);
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.cache.entry_count(),
            max_entries: self.cache.policy().max_capacity(),
        }
    }
}

fn record_lookup(kind: &'static str, hit: bool) {
    if hit {
        counter!("cache_hits_total", "kind" => kind).increment(1);
    } else {
        counter!("cache_misses_total", "kind" => kind).increment(1);
    }
    tracing::trace!(kind, hit, "cache lookup");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entry_count: u64,
    pub max_entries: Option<u64>,
}
