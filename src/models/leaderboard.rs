use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::IdentityRecord;

/// A ranked account on the landing leaderboard, enriched with identity data
/// and the number of agents the account owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub address: String,
    pub value: Decimal,
    pub identity: Option<IdentityRecord>,
    pub agent_count: usize,
}
