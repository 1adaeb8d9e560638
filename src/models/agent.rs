use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Descriptive traits the simulation assigns to an agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    #[serde(default)]
    pub animal: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub hobbies: Vec<String>,
    #[serde(default)]
    pub age_range: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
}

/// An autonomous trading agent owned by a player account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub agent_type: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub player_id: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub energy: Option<f64>,
    #[serde(default)]
    pub persona: Persona,
    /// Unix seconds of the agent's most recent action.
    #[serde(default)]
    pub last_action_timestamp: Option<i64>,
    #[serde(default)]
    pub last_action_time_ago: Option<String>,
    #[serde(default)]
    pub decide_model: Option<String>,
    #[serde(default)]
    pub message_model: Option<String>,
    #[serde(default)]
    pub decide_temp: Option<f64>,
    #[serde(default)]
    pub message_temp: Option<f64>,
    #[serde(default)]
    pub portfolio_value: Decimal,
    /// Asset symbol -> held amount. Token quantities routinely exceed what
    /// `Decimal` can hold, so they stay floating point.
    #[serde(default)]
    pub portfolio: HashMap<String, f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub nugget_url: Option<String>,
    #[serde(default)]
    pub card_url: Option<String>,
}
