use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::signal;
use tracing::info;

use training_session_client::config::Config;
use training_session_client::http_client::ReqwestTrainingSessionClient;
use training_stats::config::ServerConfig;
use training_stats::http::{AppState, router};
use training_stats::middleware::LoggingMiddleware;
use training_stats::{StatsService, ZonedClock};

const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";

/// Filter string from `TRAINING_STATS_LOG_LEVEL`, then `RUST_LOG`, then `info`,
/// with transport internals kept quiet.
fn log_filter_from(level: Option<String>, rust_log: Option<String>) -> String {
    let level = level.or(rust_log).unwrap_or_else(|| "info".to_string());
    format!("{level},hyper=warn,reqwest=warn")
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let log_env = log_filter_from(
        std::env::var("TRAINING_STATS_LOG_LEVEL").ok(),
        std::env::var("RUST_LOG").ok(),
    );
    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .compact()
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::info!(%log_env, "training_stats: log filter");

    let handle = PrometheusBuilder::new().install_recorder()?;

    let server_cfg = ServerConfig::from_env()?;
    let client_cfg = Config::from_env()?;
    info!(
        upstream = %client_cfg.base_url,
        timezone = %server_cfg.timezone,
        default_days = server_cfg.default_days,
        max_days = server_cfg.max_days,
        "training_stats: configuration loaded"
    );

    let client = LoggingMiddleware::new(ReqwestTrainingSessionClient::from_config(&client_cfg)?);
    let service = StatsService::new(
        Arc::new(client),
        Arc::new(ZonedClock(server_cfg.timezone)),
        server_cfg.fetch_concurrency,
    );
    let state = Arc::new(AppState {
        service,
        default_days: server_cfg.default_days,
        max_days: server_cfg.max_days,
        metrics: Some(handle),
    });
    let app = router(state, server_cfg.request_timeout);

    let addr = server_cfg.address;
    info!(%addr, "starting HTTP server");
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to address {addr}: {e}");
            std::process::exit(1);
        }
    };

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("failed to install ctrl+c handler: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
