// Session Store - per-user serialized access to conversational state
//
// Replaces the unsynchronized global state maps of the naive design.
// Each user id owns one async mutex; the guard is held for the whole
// "read session -> decide -> effect -> write session" critical section,
// so two near-simultaneous messages from one user can never both
// observe the same stale state. Different users never contend.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{Session, UserId};

#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<UserId, Arc<Mutex<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Lock one user's session, creating it (Idle) on first contact.
    ///
    /// The owned guard may be held across await points. The map shard
    /// lock is released before awaiting the session mutex, so a slow
    /// handler for one user never blocks lookups for others.
    pub async fn lock(&self, user_id: UserId) -> OwnedMutexGuard<Session> {
        let cell = self
            .sessions
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(Session::new())))
            .clone();
        cell.lock_owned().await
    }

    /// Number of sessions created so far (for diagnostics).
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
