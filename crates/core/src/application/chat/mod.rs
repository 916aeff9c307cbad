// Chat Dispatcher - composition point for inbound events
//
// Per event: lock the user's session, run the state machine, apply
// the repository effect, commit the new state, emit one response.

pub mod event;
mod menu;
mod transitions;

#[cfg(test)]
mod dispatcher_test;

pub use event::{CallbackAck, InboundCallback, InboundMessage, OutboundResponse, UserRef};

use std::sync::Arc;

use tracing::{debug, error};

use crate::application::session_store::SessionStore;
use crate::port::QueueRepository;

pub struct Dispatcher {
    sessions: Arc<SessionStore>,
    queue_repo: Arc<dyn QueueRepository>,
}

impl Dispatcher {
    pub fn new(sessions: Arc<SessionStore>, queue_repo: Arc<dyn QueueRepository>) -> Self {
        Self {
            sessions,
            queue_repo,
        }
    }

    /// Handle one inbound message and produce exactly one response.
    ///
    /// The session lock is held for the whole decide-effect-commit
    /// cycle, serializing all processing per user id. On a storage
    /// error the attempted transition does not commit: the session is
    /// left as it was and the user may retry.
    pub async fn handle_message(&self, msg: InboundMessage) -> OutboundResponse {
        let mut session = self.sessions.lock(msg.user.id).await;

        match transitions::apply(self.queue_repo.as_ref(), &session.state, &msg.user, &msg.text)
            .await
        {
            Ok(transition) => {
                debug!(
                    user_id = msg.user.id,
                    from = ?session.state,
                    to = ?transition.next,
                    "session transition"
                );
                session.state = transition.next;
                OutboundResponse {
                    user_id: msg.user.id,
                    text: transition.text,
                    menu: transition.menu,
                }
            }
            Err(err) => {
                error!(
                    user_id = msg.user.id,
                    error = %err,
                    "message handling failed; session left unchanged"
                );
                OutboundResponse {
                    user_id: msg.user.id,
                    text: "Something went wrong. Please try again.".to_string(),
                    menu: menu::fallback_for(&session.state),
                }
            }
        }
    }

    /// Handle a callback event: fixed acknowledgement plus an optional
    /// follow-up keyed by the callback data. Session state untouched.
    pub async fn handle_callback(&self, cb: InboundCallback) -> CallbackAck {
        let text = match cb.data.as_str() {
            "join_queue" => Some("You are in the queue!"),
            "create_queue" => Some("Creating a new queue..."),
            "edit_queue" => Some("Editing the queue..."),
            _ => None,
        };

        CallbackAck {
            callback_id: cb.callback_id,
            ack: "Request processed".to_string(),
            response: text.map(|text| OutboundResponse {
                user_id: cb.user_id,
                text: text.to_string(),
                menu: None,
            }),
        }
    }
}
