use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use super::ApiResponse;
use crate::errors::AppError;
use crate::models::LeaderboardEntry;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    /// How many of the aggregated entries to return; 0 or absent means the
    /// configured landing-page default.
    pub top: Option<usize>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<ApiResponse<Vec<LeaderboardEntry>>>, AppError> {
    let top = query
        .top
        .filter(|n| *n > 0)
        .unwrap_or(state.config.leaderboard_top);

    let mut entries = state.leaderboard.get_leaderboard().await?;
    entries.truncate(top);

    Ok(Json(ApiResponse::ok(entries)))
}
