// SQLite QueueRepository Implementation

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;

use waitline_core::domain::{Queue, QueueEntry, QueueId, UserId};
use waitline_core::error::{AppError, Result};
use waitline_core::port::{QueueRepository, RemoveOutcome, TimeProvider};

// Helper to convert sqlx::Error to AppError with structured information
fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(code) = db_err.code() {
                let code_str = code.as_ref();

                // SQLite error codes: https://www.sqlite.org/rescode.html
                match code_str {
                    "2067" | "1555" => AppError::Database(format!(
                        "Unique constraint violation: {} ({})",
                        db_err.message(),
                        code_str
                    )),
                    "787" | "3850" => AppError::Database(format!(
                        "Foreign key constraint violation: {} ({})",
                        db_err.message(),
                        code_str
                    )),
                    "5" => AppError::Database(format!(
                        "Database locked (SQLITE_BUSY): {}",
                        db_err.message()
                    )),
                    "13" => AppError::Database(format!("Database full: {}", db_err.message())),
                    _ => AppError::Database(format!(
                        "Database error [{}]: {}",
                        code_str,
                        db_err.message()
                    )),
                }
            } else {
                AppError::Database(format!("Database error: {}", db_err.message()))
            }
        }
        sqlx::Error::RowNotFound => AppError::Database("Row not found".to_string()),
        _ => AppError::Database(err.to_string()),
    }
}

#[derive(sqlx::FromRow)]
struct QueueRow {
    id: i64,
    name: String,
    created_by: i64,
    created_at: i64,
}

impl From<QueueRow> for Queue {
    fn from(row: QueueRow) -> Self {
        Queue {
            id: row.id,
            name: row.name,
            created_by: row.created_by,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct EntryRow {
    id: i64,
    queue_id: i64,
    participant_id: i64,
    display_name: String,
    joined_at: i64,
}

impl From<EntryRow> for QueueEntry {
    fn from(row: EntryRow) -> Self {
        QueueEntry {
            id: row.id,
            queue_id: row.queue_id,
            participant_id: row.participant_id,
            display_name: row.display_name,
            joined_at: row.joined_at,
        }
    }
}

async fn queue_exists<'c, E>(executor: E, queue_id: QueueId) -> Result<bool>
where
    E: sqlx::Executor<'c, Database = sqlx::Sqlite>,
{
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM queues WHERE id = ?")
        .bind(queue_id)
        .fetch_one(executor)
        .await
        .map_err(map_sqlx_error)?;
    Ok(count > 0)
}

pub struct SqliteQueueRepository {
    pool: SqlitePool,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqliteQueueRepository {
    pub fn new(pool: SqlitePool, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            pool,
            time_provider,
        }
    }
}

#[async_trait]
impl QueueRepository for SqliteQueueRepository {
    async fn create_queue(&self, name: &str, created_by: UserId) -> Result<QueueId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation(
                "Queue name cannot be empty".to_string(),
            ));
        }

        let created_at = self.time_provider.now_millis();
        let result =
            sqlx::query("INSERT INTO queues (name, created_by, created_at) VALUES (?, ?, ?)")
                .bind(name)
                .bind(created_by)
                .bind(created_at)
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(result.last_insert_rowid())
    }

    async fn list_queues(&self) -> Result<Vec<Queue>> {
        let rows = sqlx::query_as::<_, QueueRow>(
            "SELECT id, name, created_by, created_at FROM queues ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Queue::from).collect())
    }

    async fn find_queue_id_by_name(&self, name: &str) -> Result<Option<QueueId>> {
        // Names are not unique; the earliest-created queue wins.
        let id: Option<i64> =
            sqlx::query_scalar("SELECT id FROM queues WHERE name = ? ORDER BY id ASC LIMIT 1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(id)
    }

    async fn delete_queue(&self, queue_id: QueueId) -> Result<()> {
        // Queue row and entries go in ONE transaction, so an
        // interrupted delete never leaves orphaned entries.
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        sqlx::query("DELETE FROM queue_entries WHERE queue_id = ?")
            .bind(queue_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        let result = sqlx::query("DELETE FROM queues WHERE id = ?")
            .bind(queue_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            tx.rollback().await.map_err(map_sqlx_error)?;
            return Err(AppError::NotFound(format!("queue {queue_id}")));
        }

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn clear_entries(&self, queue_id: QueueId) -> Result<()> {
        if !queue_exists(&self.pool, queue_id).await? {
            return Err(AppError::NotFound(format!("queue {queue_id}")));
        }

        // No-op success on an already-empty queue.
        sqlx::query("DELETE FROM queue_entries WHERE queue_id = ?")
            .bind(queue_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn add_entry(
        &self,
        queue_id: QueueId,
        participant_id: UserId,
        display_name: &str,
    ) -> Result<()> {
        let joined_at = self.time_provider.now_millis();

        // Existence check and insert share a transaction so a
        // concurrent delete_queue cannot slip between them.
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        if !queue_exists(&mut *tx, queue_id).await? {
            return Err(AppError::NotFound(format!("queue {queue_id}")));
        }

        // Idempotent re-join: the UNIQUE(queue_id, participant_id)
        // index absorbs duplicates.
        sqlx::query(
            r#"
            INSERT INTO queue_entries (queue_id, participant_id, display_name, joined_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(queue_id, participant_id) DO NOTHING
            "#,
        )
        .bind(queue_id)
        .bind(participant_id)
        .bind(display_name)
        .bind(joined_at)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn remove_entry(&self, queue_id: QueueId, display_name: &str) -> Result<RemoveOutcome> {
        if !queue_exists(&self.pool, queue_id).await? {
            return Err(AppError::NotFound(format!("queue {queue_id}")));
        }

        let result =
            sqlx::query("DELETE FROM queue_entries WHERE queue_id = ? AND display_name = ?")
                .bind(queue_id)
                .bind(display_name)
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            Ok(RemoveOutcome::NotInQueue)
        } else {
            Ok(RemoveOutcome::Removed)
        }
    }

    async fn list_entries(&self, queue_id: QueueId) -> Result<Vec<QueueEntry>> {
        if !queue_exists(&self.pool, queue_id).await? {
            return Err(AppError::NotFound(format!("queue {queue_id}")));
        }

        let rows = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT id, queue_id, participant_id, display_name, joined_at
            FROM queue_entries
            WHERE queue_id = ?
            ORDER BY joined_at ASC, id ASC
            "#,
        )
        .bind(queue_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(QueueEntry::from).collect())
    }
}
