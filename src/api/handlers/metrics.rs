use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use metrics::gauge;

use crate::AppState;

/// Prometheus scrape endpoint. The cache gauge is refreshed here because moka
/// only settles its entry count lazily.
pub async fn render(State(state): State<AppState>) -> impl IntoResponse {
    state.cache.run_pending_tasks().await;
    gauge!("cache_entries").set(state.cache.stats().entry_count as f64);

    ([(CONTENT_TYPE, "text/plain; version=0.0.4")], state.metrics_handle.render())
}
