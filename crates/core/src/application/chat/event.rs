// Inbound / Outbound Event Types
//
// The real transport (a chat bot API) is out of scope; these are the
// abstract shapes the dispatcher consumes and produces.

use crate::domain::UserId;

/// The user behind an inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: UserId,
    pub display_name: String,
}

/// A plain text message from a user.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub user: UserRef,
    pub text: String,
}

/// An out-of-band action acknowledgement (inline-button callback).
#[derive(Debug, Clone)]
pub struct InboundCallback {
    pub user_id: UserId,
    pub callback_id: String,
    pub data: String,
}

/// Exactly one outbound response per inbound message.
///
/// `menu` is opaque presentation data: an ordered list of command
/// labels the transport may render as a reply keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundResponse {
    pub user_id: UserId,
    pub text: String,
    pub menu: Option<Vec<String>>,
}

/// Reply to a callback event: a fixed acknowledgement, plus an
/// optional follow-up message.
#[derive(Debug, Clone)]
pub struct CallbackAck {
    pub callback_id: String,
    pub ack: String,
    pub response: Option<OutboundResponse>,
}
