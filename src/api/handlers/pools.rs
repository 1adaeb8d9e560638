use axum::extract::{Path, State};
use axum::Json;

use super::ApiResponse;
use crate::dx::PricePoint;
use crate::errors::AppError;
use crate::AppState;

pub async fn history(
    State(state): State<AppState>,
    Path(asset): Path<String>,
) -> Result<Json<ApiResponse<Vec<PricePoint>>>, AppError> {
    let asset = asset.trim();
    if asset.is_empty() {
        return Err(AppError::BadRequest("asset symbol is required".into()));
    }

    let points = state.portfolio.price_history(asset).await?;
    Ok(Json(ApiResponse::ok(points)))
}
