use crate::cache::PortfolioCache;
use crate::ens::EnsClient;
use crate::models::IdentityRecord;

/// Cache-first lookup of an account's public ENS profile.
///
/// "No profile" answers from the registry are cached like real ones so an
/// account without a profile costs one upstream call per TTL window. Transport
/// failures are not cached.
#[derive(Debug, Clone)]
pub struct IdentityService {
    ens: EnsClient,
    cache: PortfolioCache,
}

impl IdentityService {
    pub fn new(ens: EnsClient, cache: PortfolioCache) -> Self {
        Self { ens, cache }
    }

    pub async fn get_identity(&self, account: &str) -> Option<IdentityRecord> {
        if let Some(cached) = self.cache.get_identity(account).await {
            return cached;
        }

        match self.ens.lookup(account).await {
            Ok(record) => {
                self.cache.set_identity(account, record.clone()).await;
                record
            }
            Err(e) => {
                tracing::warn!(account, error = %e, "Identity lookup failed, treating as absent");
                None
            }
        }
    }
}
