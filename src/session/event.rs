//! Events that drive the session

use crate::adapter::{AdapterError, AdapterReply};
use crate::transcript::TurnId;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// User submitted a query; the id is assigned by the caller
    Submit { turn_id: TurnId, query: String },

    /// The adapter call for `turn_id` returned a reply
    ReplyReceived { turn_id: TurnId, reply: AdapterReply },

    /// The adapter call for `turn_id` failed
    ReplyFailed { turn_id: TurnId, error: AdapterError },
}

impl Event {
    pub fn turn_id(&self) -> TurnId {
        match self {
            Event::Submit { turn_id, .. }
            | Event::ReplyReceived { turn_id, .. }
            | Event::ReplyFailed { turn_id, .. } => *turn_id,
        }
    }
}
