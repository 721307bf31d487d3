pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod state;

use crate::config::Config;
use crate::infra::factory::bootstrap_state;
use api::router::create_router;
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_DIR: &str = "./logs";
const LOG_FILE: &str = "event-admin.log";
const FILE_LOG_FILTER: &str = "info,event_admin=debug";

/// Pretty console output driven by `RUST_LOG`, plus a daily JSON file that
/// carries the request span (request id, route, admin) on every line.
pub fn init_logging() -> WorkerGuard {
    let (file_writer, guard) = tracing_appender::non_blocking(
        tracing_appender::rolling::daily(LOG_DIR, LOG_FILE),
    );

    let json_file = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_target(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::new(FILE_LOG_FILTER));

    let console = tracing_subscriber::fmt::layer()
        .pretty()
        .with_target(false)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()));

    tracing_subscriber::registry()
        .with(console)
        .with(json_file)
        .init();

    info!("Logging to console and {}/{}", LOG_DIR, LOG_FILE);
    guard
}

pub async fn run() -> std::io::Result<()> {
    let _guard = init_logging();

    let config = Config::from_env();
    info!(
        timezone = %config.civil_timezone,
        collection = %config.events_collection,
        "Starting event admin"
    );

    let state = Arc::new(bootstrap_state(&config).await);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .inspect_err(|e| error!("Server stopped: {}", e))
}
