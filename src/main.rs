use dxdx::api::router::create_router;
use dxdx::config::{AppConfig, LogFormat};
use dxdx::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(config.log_format);

    let addr = format!("{}:{}", config.host, config.port);
    let metrics_handle = dxdx::metrics::init_metrics()?;

    tracing::info!(
        dx_api = %config.dx_api_url,
        ens_api = %config.ens_api_url,
        cache_max_entries = config.cache_max_entries,
        cache_ttl_secs = config.cache_ttl_secs,
        timeout_secs = config.upstream_timeout_secs,
        "Starting dxdx"
    );

    let state = AppState::new(config, metrics_handle)?;
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
}
