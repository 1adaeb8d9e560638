use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Landing view
        .route("/api/leaderboard", get(handlers::leaderboard::list))
        // Lookups
        .route("/api/search", get(handlers::portfolio::search))
        .route("/api/portfolio/:address_or_name", get(handlers::portfolio::detail))
        // Asset drill-down
        .route("/api/pools/:asset/history", get(handlers::pools::history));

    // Read-only public data: any origin may fetch it.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render))
        .merge(api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
