//! Pure state transition function

use super::{Effect, Event, SessionState};
use crate::adapter::AdapterReply;
use crate::transcript::{Answer, TurnId};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Rejected events. None of these are shown to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Empty query")]
    EmptyQuery,
    #[error("A request is already in flight")]
    Busy,
    #[error("Reply for turn {0} does not match the pending turn")]
    StaleReply(TurnId),
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs, with no I/O.
pub fn transition(
    state: &SessionState,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        (_, Event::Submit { query, .. }) if query.trim().is_empty() => {
            Err(TransitionError::EmptyQuery)
        }

        // Idle + Submit -> AwaitingReply
        (SessionState::Idle, Event::Submit { turn_id, query }) => {
            Ok(TransitionResult::new(SessionState::AwaitingReply { turn_id })
                .with_effect(Effect::AppendTurn {
                    turn_id,
                    query: query.clone(),
                })
                .with_effect(Effect::SendQuery { turn_id, query })
                .with_effect(Effect::NotifyDisplay))
        }

        // One call at a time; a second submission is dropped, not queued
        (SessionState::AwaitingReply { .. }, Event::Submit { .. }) => Err(TransitionError::Busy),

        (SessionState::AwaitingReply { turn_id }, Event::ReplyReceived { turn_id: settled, reply })
            if *turn_id == settled =>
        {
            Ok(settle(settled, answer_for_reply(reply)))
        }

        (SessionState::AwaitingReply { turn_id }, Event::ReplyFailed { turn_id: settled, error })
            if *turn_id == settled =>
        {
            let reason = error.reason().to_string();
            Ok(settle(settled, Answer::ErrorText(reason)))
        }

        (_, Event::ReplyReceived { turn_id, .. } | Event::ReplyFailed { turn_id, .. }) => {
            Err(TransitionError::StaleReply(turn_id))
        }
    }
}

fn settle(turn_id: TurnId, answer: Answer) -> TransitionResult {
    TransitionResult::new(SessionState::Idle)
        .with_effect(Effect::SettleTurn { turn_id, answer })
        .with_effect(Effect::NotifyDisplay)
}

/// The kind of answer follows from how the call resolved, not its content
fn answer_for_reply(reply: AdapterReply) -> Answer {
    match reply {
        AdapterReply::Structured(result) => Answer::Structured(result),
        AdapterReply::Text(text) => Answer::Text(text),
    }
}
