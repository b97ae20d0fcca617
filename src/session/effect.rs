//! Effects produced by state transitions

use crate::transcript::{Answer, TurnId};

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Append a pending turn to the transcript
    AppendTurn { turn_id: TurnId, query: String },

    /// Issue the one outbound call for this turn
    SendQuery { turn_id: TurnId, query: String },

    /// Write the terminal answer of the last turn
    SettleTurn { turn_id: TurnId, answer: Answer },

    /// Publish the transcript to the display surface
    NotifyDisplay,
}
