// Queue Domain Model

use serde::{Deserialize, Serialize};

/// Queue identifier (SQLite rowid, assigned on creation)
pub type QueueId = i64;

/// User identifier (chat id on the real transport)
pub type UserId = i64;

/// A named waiting-list. Names are not unique; lookups resolve
/// duplicates to the lowest id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Queue {
    pub id: QueueId,
    pub name: String,
    pub created_by: UserId,
    pub created_at: i64, // epoch ms
}

/// One participant's membership record in one queue.
///
/// Invariant: at most one entry per (queue_id, participant_id) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: i64,
    pub queue_id: QueueId,
    pub participant_id: UserId,
    pub display_name: String,
    pub joined_at: i64, // epoch ms
}
