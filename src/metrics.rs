use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register the application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    // Pre-register so they appear even before the first increment.
    for endpoint in ["agents", "actions", "prompts", "leaderboard", "price_history", "ens"] {
        counter!("upstream_requests_total", "endpoint" => endpoint).absolute(0);
        counter!("upstream_failures_total", "endpoint" => endpoint).absolute(0);
    }
    for kind in ["leaderboard", "identity"] {
        counter!("cache_hits_total", "kind" => kind).absolute(0);
        counter!("cache_misses_total", "kind" => kind).absolute(0);
    }
    gauge!("cache_entries").set(0.0);

    Ok(handle)
}

/// A handle backed by a recorder that is not installed globally. Metrics
/// emitted through the facade are not captured; used where only the
/// `/metrics` endpoint shape matters.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}
