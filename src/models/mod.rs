pub mod action;
pub mod agent;
pub mod identity;
pub mod leaderboard;
pub mod portfolio;

pub use action::{Action, ActionDetails};
pub use agent::{Agent, Persona};
pub use identity::IdentityRecord;
pub use leaderboard::LeaderboardEntry;
pub use portfolio::{AssetShare, LookupCondition, PortfolioSummary, PortfolioView};

use std::collections::HashMap;

/// Agent id -> current operating prompt.
pub type Prompts = HashMap<String, String>;
