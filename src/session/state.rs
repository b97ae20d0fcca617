//! Session state types

use crate::transcript::TurnId;

/// Session state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Ready for input, nothing in flight
    #[default]
    Idle,

    /// One adapter call in flight for the last turn of the transcript
    AwaitingReply { turn_id: TurnId },
}

impl SessionState {
    /// True while a submission's call has not settled
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionState::AwaitingReply { .. })
    }

    /// The turn whose call is in flight
    pub fn pending_turn(&self) -> Option<TurnId> {
        match self {
            SessionState::Idle => None,
            SessionState::AwaitingReply { turn_id } => Some(*turn_id),
        }
    }
}
