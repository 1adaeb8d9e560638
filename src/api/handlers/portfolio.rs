use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use super::ApiResponse;
use crate::errors::AppError;
use crate::models::{LookupCondition, PortfolioView};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub address: Option<String>,
}

/// Query-string lookup used by the search form. Every recoverable outcome,
/// including "nothing entered", is a 200 whose body carries the condition.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<PortfolioView>>, AppError> {
    let view = state.portfolio.search(query.address.as_deref()).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// Path lookup for a portfolio page. Unresolvable input is a 404 and an
/// account without agents is a 422.
pub async fn detail(
    State(state): State<AppState>,
    Path(address_or_name): Path<String>,
) -> Result<Json<ApiResponse<PortfolioView>>, AppError> {
    let view = state.portfolio.lookup(&address_or_name).await?;

    match view.condition {
        None => Ok(Json(ApiResponse::ok(view))),
        Some(LookupCondition::NoAgents) => {
            let address = view.resolved_address.as_deref().unwrap_or(&view.address);
            Err(AppError::Unprocessable(format!(
                "No agents found for {address}. Sure they're playing?"
            )))
        }
        Some(LookupCondition::InvalidAddress) | Some(LookupCondition::NoQuery) => Err(
            AppError::NotFound(format!("Couldn't find an address for {}", address_or_name.trim())),
        ),
    }
}
