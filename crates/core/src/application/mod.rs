// Application Layer - Session handling and dispatch

pub mod chat;
pub mod session_store;

// Re-exports
pub use chat::{CallbackAck, Dispatcher, InboundCallback, InboundMessage, OutboundResponse, UserRef};
pub use session_store::SessionStore;
