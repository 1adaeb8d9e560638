use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{Action, Agent};

// ---------------------------------------------------------------------------
// Lookup conditions
// ---------------------------------------------------------------------------

/// Recoverable outcomes of an address lookup that are reported as data
/// rather than as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupCondition {
    NoQuery,
    InvalidAddress,
    NoAgents,
}

impl LookupCondition {
    pub fn message(&self) -> &'static str {
        match self {
            LookupCondition::NoQuery => "Enter an address or ENS name",
            LookupCondition::InvalidAddress => "Invalid address or ENS name",
            LookupCondition::NoAgents => "No agents found",
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, LookupCondition::NoQuery)
    }
}

impl fmt::Display for LookupCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

// ---------------------------------------------------------------------------
// Portfolio view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetShare {
    pub symbol: String,
    pub amount: f64,
    /// `amount / total_value * 100`, two decimal places.
    pub share_pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub total_value: Decimal,
    pub agent_count: usize,
    pub distribution: Vec<AssetShare>,
}

/// Everything the presentation layer needs to render one account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioView {
    /// The address or ENS name as the user typed it.
    pub address: String,
    pub resolved_address: Option<String>,
    pub display_name: String,
    /// Sorted by descending portfolio value.
    pub agents: Vec<Agent>,
    /// Most recent first.
    pub actions: Vec<Action>,
    /// Keyed by agent id; each bucket most recent first.
    pub actions_by_agent: BTreeMap<String, Vec<Action>>,
    pub prompts: HashMap<String, String>,
    pub summary: PortfolioSummary,
    pub condition: Option<LookupCondition>,
    pub error: Option<String>,
}

impl PortfolioView {
    pub fn empty(address: &str, condition: LookupCondition) -> Self {
        Self {
            address: address.to_string(),
            resolved_address: None,
            display_name: pretty_address(address),
            agents: Vec::new(),
            actions: Vec::new(),
            actions_by_agent: BTreeMap::new(),
            prompts: HashMap::new(),
            summary: PortfolioSummary::default(),
            condition: Some(condition),
            error: condition.is_error().then(|| condition.message().to_string()),
        }
    }

    pub fn build(
        address: &str,
        resolved_address: &str,
        mut agents: Vec<Agent>,
        mut actions: Vec<Action>,
        prompts: HashMap<String, String>,
    ) -> Self {
        sort_agents_by_value(&mut agents);
        sort_recent_first(&mut actions);
        let summary = summarize(&agents);
        let actions_by_agent = group_actions_by_agent(&actions);

        Self {
            address: address.to_string(),
            resolved_address: Some(resolved_address.to_string()),
            display_name: pretty_address(address),
            agents,
            actions,
            actions_by_agent,
            prompts,
            summary,
            condition: None,
            error: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Shaping helpers
// ---------------------------------------------------------------------------

pub fn sort_agents_by_value(agents: &mut [Agent]) {
    agents.sort_by(|a, b| b.portfolio_value.cmp(&a.portfolio_value));
}

/// Strictly descending by timestamp. Unparseable timestamps sink to the end;
/// ties keep upstream order.
pub fn sort_recent_first(actions: &mut [Action]) {
    actions.sort_by_cached_key(|a| Reverse(a.timestamp()));
}

/// Buckets actions by `agent_id`. Display names are not unique, so they are
/// never used as the key. Input order is preserved within each bucket.
pub fn group_actions_by_agent(actions: &[Action]) -> BTreeMap<String, Vec<Action>> {
    let mut grouped: BTreeMap<String, Vec<Action>> = BTreeMap::new();
    for action in actions {
        grouped
            .entry(action.agent_id.clone())
            .or_default()
            .push(action.clone());
    }
    grouped
}

pub fn summarize(agents: &[Agent]) -> PortfolioSummary {
    let total_value: Decimal = agents.iter().map(|a| a.portfolio_value).sum();

    let mut holdings: HashMap<&str, f64> = HashMap::new();
    for agent in agents {
        for (symbol, amount) in &agent.portfolio {
            *holdings.entry(symbol.as_str()).or_insert(0.0) += *amount;
        }
    }

    let mut distribution: Vec<AssetShare> = holdings
        .into_iter()
        .map(|(symbol, amount)| AssetShare {
            symbol: symbol.to_string(),
            amount,
            share_pct: share_pct(amount, total_value),
        })
        .collect();
    distribution.sort_by(|a, b| b.amount.total_cmp(&a.amount).then_with(|| a.symbol.cmp(&b.symbol)));

    PortfolioSummary {
        total_value,
        agent_count: agents.len(),
        distribution,
    }
}

fn share_pct(amount: f64, total: Decimal) -> f64 {
    match total.to_f64() {
        Some(total) if total != 0.0 => (amount * 100.0 / total * 100.0).round() / 100.0,
        _ => 0.0,
    }
}

/// ENS names are shown verbatim; raw addresses are cut to their first six
/// characters.
pub fn pretty_address(address: &str) -> String {
    if address.contains(".eth") {
        return address.to_string();
    }
    address.chars().take(6).collect()
}
