use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::ports::DocumentStore;
use crate::domain::services::{auth_service::AuthService, event_service::EventService};
use crate::infra::repositories::{
    postgres_document_store::PostgresDocumentStore,
    sqlite_document_store::SqliteDocumentStore,
};

const SLOW_STATEMENT: Duration = Duration::from_millis(500);

/// Connects the document store named by `DATABASE_URL`, migrates it and wires
/// the services on top.
pub async fn bootstrap_state(config: &Config) -> AppState {
    let url = config.database_url.as_str();

    let store: Arc<dyn DocumentStore> = if is_postgres_url(url) {
        let pool = connect_postgres(url).await;
        run_postgres_migrations(&pool).await;
        Arc::new(PostgresDocumentStore::new(pool))
    } else {
        let pool = connect_sqlite(url).await;
        run_sqlite_migrations(&pool).await;
        Arc::new(SqliteDocumentStore::new(pool))
    };

    build_state(config, store)
}

pub fn build_state(config: &Config, store: Arc<dyn DocumentStore>) -> AppState {
    info!(
        collection = %config.events_collection,
        timezone = %config.civil_timezone,
        sales_tax_rate = config.sales_tax_rate,
        "Event service configured"
    );

    let event_service = EventService::new(
        store,
        config.events_collection.clone(),
        config.civil_timezone,
        config.sales_tax_rate,
    );

    AppState {
        config: config.clone(),
        event_service: Arc::new(event_service),
        auth_service: Arc::new(AuthService::new(config)),
    }
}

fn is_postgres_url(url: &str) -> bool {
    url.starts_with("postgres://") || url.starts_with("postgresql://")
}

async fn connect_postgres(url: &str) -> PgPool {
    info!("Connecting document store to PostgreSQL");

    let opts = PgConnectOptions::from_str(url)
        .expect("Invalid Postgres URL")
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, SLOW_STATEMENT);

    PgPoolOptions::new()
        .max_connections(10)
        .connect_with(opts)
        .await
        .expect("Failed to connect to Postgres")
}

async fn connect_sqlite(url: &str) -> SqlitePool {
    info!("Connecting document store to SQLite (WAL)");

    let opts = SqliteConnectOptions::from_str(url)
        .expect("Invalid SQLite connection string")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, SLOW_STATEMENT);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .expect("Failed to connect to SQLite")
}

pub async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}

#[cfg(test)]
mod tests {
    use super::is_postgres_url;

    #[test]
    fn test_store_selection_by_url() {
        assert!(is_postgres_url("postgres://u:p@localhost/events"));
        assert!(is_postgres_url("postgresql://localhost/events"));
        assert!(!is_postgres_url("sqlite://event-admin.db"));
        assert!(!is_postgres_url("sqlite::memory:"));
    }
}
