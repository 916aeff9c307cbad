// Session Domain Model
//
// One value carries conversational state AND context (selected queue,
// pending action) together, so every transition is a single atomic
// replacement instead of two independently-racing map updates.

use serde::{Deserialize, Serialize};

use crate::domain::queue::QueueId;

/// What the user intends to do with the queue they are about to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingAction {
    Join,
    Show,
    AdminEnter,
}

/// Conversational state, matched exhaustively by the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    SelectingQueue { pending: PendingAction },
    CreatingQueue,
    AdminMode { queue_id: QueueId },
    AdminAwaitingParticipantName { queue_id: QueueId },
}

/// Transient per-user session. Created lazily on first inbound event,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == SessionState::Idle
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
