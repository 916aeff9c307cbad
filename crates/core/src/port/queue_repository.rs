// Queue Repository Port (Interface)

use async_trait::async_trait;

use crate::domain::{Queue, QueueEntry, QueueId, UserId};
use crate::error::Result;

/// Outcome of removing a participant. "Not in this queue" is an
/// expected result the caller words differently, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotInQueue,
}

/// Repository interface for queue and entry persistence.
///
/// Every operation is atomic with respect to concurrent callers;
/// multi-row mutations (`delete_queue`) run in a single transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueRepository: Send + Sync {
    /// Insert a new queue and return its id.
    ///
    /// Fails with `Validation` on an empty name. Names are NOT unique;
    /// duplicate names are resolved by `find_queue_id_by_name`.
    async fn create_queue(&self, name: &str, created_by: UserId) -> Result<QueueId>;

    /// All queues, ordered by id ascending.
    async fn list_queues(&self) -> Result<Vec<Queue>>;

    /// Resolve a queue name (case-sensitive exact match) to an id.
    /// When several queues share the name, the lowest id wins.
    async fn find_queue_id_by_name(&self, name: &str) -> Result<Option<QueueId>>;

    /// Delete the queue row and all its entries in one transaction.
    /// Fails with `NotFound` if the queue does not exist.
    async fn delete_queue(&self, queue_id: QueueId) -> Result<()>;

    /// Remove all entries. No-op success on an already-empty queue;
    /// `NotFound` only if the queue itself is absent.
    async fn clear_entries(&self, queue_id: QueueId) -> Result<()>;

    /// Enroll a participant. Idempotent: re-joining an already-joined
    /// queue succeeds without creating a duplicate row.
    async fn add_entry(
        &self,
        queue_id: QueueId,
        participant_id: UserId,
        display_name: &str,
    ) -> Result<()>;

    /// Remove the entry matching a display name.
    async fn remove_entry(&self, queue_id: QueueId, display_name: &str) -> Result<RemoveOutcome>;

    /// Entries ordered by join time ascending (id as tie-break).
    /// Fails with `NotFound` if the queue does not exist.
    async fn list_entries(&self, queue_id: QueueId) -> Result<Vec<QueueEntry>>;
}
