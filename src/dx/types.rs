use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Prompts;

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

/// Most list endpoints wrap their payload in `{ "data": [...] }`; `data` is
/// `null` when the player has nothing on record.
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: Option<Vec<T>>,
}

impl<T> DataEnvelope<T> {
    pub fn into_vec(self) -> Vec<T> {
        self.data.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptsEnvelope {
    #[serde(default)]
    pub prompts: Option<Prompts>,
}

// ---------------------------------------------------------------------------
// Leaderboard (raw, before enrichment)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiLeaderboardEntry {
    #[serde(alias = "address", alias = "player")]
    pub player_id: String,
    #[serde(default, alias = "portfolio_value")]
    pub value: Decimal,
    pub rank: u32,
}

// ---------------------------------------------------------------------------
// Pool price history
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PricePoint {
    pub timestamp: i64,
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Any other per-point fields the pool reports, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
