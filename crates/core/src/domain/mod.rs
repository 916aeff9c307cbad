// Domain Layer - Pure entities and transition rules

pub mod command;
pub mod queue;
pub mod session;

// Re-exports
pub use command::{AdminCommand, MenuCommand};
pub use queue::{Queue, QueueEntry, QueueId, UserId};
pub use session::{PendingAction, Session, SessionState};
