use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trade payload attached to an action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionDetails {
    #[serde(default, rename = "type")]
    pub trade_type: Option<String>,
    #[serde(default)]
    pub amount_in: Option<f64>,
    #[serde(default)]
    pub amount_out: Option<f64>,
    #[serde(default)]
    pub price_after: Option<f64>,
    #[serde(default)]
    pub token_symbol: Option<String>,
}

/// One logged event performed by an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    pub agent_id: String,
    /// Display only. Not unique across agents, never used as a join key.
    #[serde(default)]
    pub agent_name: Option<String>,
    pub action_timestamp: String,
    #[serde(default)]
    pub action_type: Option<String>,
    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub details: ActionDetails,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Action {
    /// Parsed `action_timestamp`. Accepts RFC 3339 and naive ISO timestamps
    /// (interpreted as UTC).
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = self.action_timestamp.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .map(|naive| naive.and_utc())
    }
}
