// SQLite Connection Pool Setup

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use waitline_core::error::{AppError, Result};

/// Create SQLite connection pool with WAL mode and foreign keys on.
///
/// Foreign keys must be enforced per-connection in SQLite, so the
/// pragma is part of the connect options rather than a one-off query.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| AppError::Database(e.to_string()))?
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true)
        .create_if_missing(true);

    // A :memory: database exists per connection; cap the pool at one
    // connection so every caller sees the same database.
    let max_connections = if database_url.contains(":memory:") { 1 } else { 10 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(pool)
}
