//! Waitline - Main Entry Point
//!
//! Composition root: wires the SQLite queue repository, the session
//! store and the dispatcher, then serves inbound events. The real
//! chat transport is out of scope; a line-based console adapter
//! stands in for it.

mod console;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use waitline_core::application::{Dispatcher, SessionStore};
use waitline_core::port::time_provider::SystemTimeProvider;
use waitline_infra_sqlite::{create_pool, run_migrations, SqliteQueueRepository};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_DB_PATH: &str = "~/.waitline/queues.db";

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging
    let log_format = std::env::var("WAITLINE_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("waitline=info"))
        .expect("Failed to create env filter");

    match log_format.as_str() {
        "json" => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            // Development: pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    info!("Waitline v{} starting...", VERSION);

    // 2. Load configuration
    let db_path = std::env::var("WAITLINE_DB_PATH")
        .unwrap_or_else(|_| shellexpand::tilde(DEFAULT_DB_PATH).into_owned());

    if !db_path.contains(":memory:") {
        if let Some(dir) = std::path::Path::new(&db_path).parent() {
            std::fs::create_dir_all(dir)?;
        }
    }

    info!(db_path = %db_path, "Initializing database...");

    // 3. Initialize database
    let pool = create_pool(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("DB pool creation failed: {}", e))?;
    run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    // 4. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let queue_repo = Arc::new(SqliteQueueRepository::new(pool, time_provider));
    let sessions = Arc::new(SessionStore::new());
    let dispatcher = Arc::new(Dispatcher::new(sessions, queue_repo));

    info!("System ready. Reading events from stdin (Ctrl+C to quit).");
    console::print_usage();

    // 5. Serve console events until EOF or Ctrl+C
    tokio::select! {
        result = console::run(dispatcher) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully...");
        }
    }

    info!("Shutdown complete.");
    Ok(())
}
