pub mod client;
pub mod types;

pub use client::{DxClient, UpstreamError, DEFAULT_PAGE_SIZE, DX_API_BASE};
pub use types::{ApiLeaderboardEntry, PricePoint};
