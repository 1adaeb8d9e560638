use futures_util::future::join_all;

use crate::cache::PortfolioCache;
use crate::dx::{ApiLeaderboardEntry, DxClient, UpstreamError};
use crate::models::LeaderboardEntry;
use crate::services::identity::IdentityService;

/// Builds the landing-page leaderboard: the upstream top players, each
/// enriched with its ENS identity and agent count. The whole aggregate is
/// memoized in the cache for one TTL window.
#[derive(Debug, Clone)]
pub struct LeaderboardService {
    dx: DxClient,
    identity: IdentityService,
    cache: PortfolioCache,
    limit: u32,
}

impl LeaderboardService {
    pub fn new(dx: DxClient, identity: IdentityService, cache: PortfolioCache, limit: u32) -> Self {
        Self {
            dx,
            identity,
            cache,
            limit,
        }
    }

    /// All `limit` entries in rank order. Callers pick their own prefix.
    ///
    /// Concurrent misses share a single fetch and enrichment pass.
    pub async fn get_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, UpstreamError> {
        let entries = self
            .cache
            .get_or_load_leaderboard(self.limit, self.load())
            .await?;
        Ok(entries)
    }

    async fn load(&self) -> Result<Vec<LeaderboardEntry>, UpstreamError> {
        let raw = self.dx.get_leaderboard(self.limit).await?;
        tracing::info!(count = raw.len(), limit = self.limit, "Fetched leaderboard, enriching");

        let mut entries = join_all(raw.into_iter().map(|entry| self.enrich(entry))).await;
        entries.sort_by_key(|e| e.rank);
        Ok(entries)
    }

    /// Identity and agent count are fetched together. Either may fail on its
    /// own without affecting the entry or its neighbours.
    async fn enrich(&self, entry: ApiLeaderboardEntry) -> LeaderboardEntry {
        let (identity, agents) = tokio::join!(
            self.identity.get_identity(&entry.player_id),
            self.dx.get_agents(&entry.player_id),
        );

        let agent_count = match agents {
            Ok(agents) => agents.len(),
            Err(e) => {
                tracing::warn!(
                    player = %entry.player_id,
                    error = %e,
                    "Agent count unavailable, defaulting to zero"
                );
                0
            }
        };

        LeaderboardEntry {
            rank: entry.rank,
            address: entry.player_id,
            value: entry.value,
            identity,
            agent_count,
        }
    }
}
