// Port Layer - Interfaces for external dependencies

pub mod queue_repository;
pub mod time_provider;

// Re-exports
pub use queue_repository::{QueueRepository, RemoveOutcome};
pub use time_provider::TimeProvider;
