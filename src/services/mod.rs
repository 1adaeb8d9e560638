pub mod identity;
pub mod leaderboard;
pub mod name_resolver;
pub mod portfolio;

pub use identity::IdentityService;
pub use leaderboard::LeaderboardService;
pub use name_resolver::{NameResolver, Resolution, ResolveError};
pub use portfolio::PortfolioService;
