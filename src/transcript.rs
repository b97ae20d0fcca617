//! Session transcript: the ordered log of conversational turns
//!
//! Turns are only ever appended. The one permitted in-place update is the
//! terminal write that settles the last turn's pending answer.

use crate::provision::ProvisionResult;
use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Identifier assigned to a turn when it is submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TurnId(Uuid);

impl TurnId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Answer to a turn
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Outbound call not settled yet
    Pending,
    Text(String),
    Structured(ProvisionResult),
    /// The call failed; holds the most specific reason available
    ErrorText(String),
}

impl Answer {
    pub fn is_pending(&self) -> bool {
        matches!(self, Answer::Pending)
    }

    /// How a terminal answer is rendered. `None` while pending.
    pub fn kind(&self) -> Option<AnswerKind> {
        match self {
            Answer::Pending => None,
            Answer::Text(_) | Answer::ErrorText(_) => Some(AnswerKind::Text),
            Answer::Structured(_) => Some(AnswerKind::Structured),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    Text,
    Structured,
}

/// One exchange: the user's query and its (possibly pending) answer
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    id: TurnId,
    query: String,
    answer: Answer,
    submitted_at: DateTime<Utc>,
    settled_at: Option<DateTime<Utc>>,
}

impl Turn {
    fn new(id: TurnId, query: String) -> Self {
        Self {
            id,
            query,
            answer: Answer::Pending,
            submitted_at: Utc::now(),
            settled_at: None,
        }
    }

    pub fn id(&self) -> TurnId {
        self.id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn answer(&self) -> &Answer {
        &self.answer
    }

    pub fn kind(&self) -> Option<AnswerKind> {
        self.answer.kind()
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn settled_at(&self) -> Option<DateTime<Utc>> {
        self.settled_at
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("No turn to settle")]
    Empty,
    #[error("Turn {0} is already settled")]
    AlreadySettled(TurnId),
    #[error("Last turn is {actual}, not {expected}")]
    NotLastTurn { expected: TurnId, actual: TurnId },
    #[error("A turn cannot be settled with a pending answer")]
    PendingAnswer,
}

/// Ordered sequence of turns, oldest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Append a new pending turn
    pub fn append(&mut self, id: TurnId, query: impl Into<String>) {
        self.turns.push(Turn::new(id, query.into()));
    }

    /// Write the terminal answer of the last turn.
    ///
    /// The write is positional: only one request is ever outstanding, so the
    /// pending turn is always the last one. The id check guards that.
    pub fn settle_last(&mut self, id: TurnId, answer: Answer) -> Result<(), TranscriptError> {
        if answer.is_pending() {
            return Err(TranscriptError::PendingAnswer);
        }
        let turn = self.turns.last_mut().ok_or(TranscriptError::Empty)?;
        if turn.id != id {
            return Err(TranscriptError::NotLastTurn {
                expected: id,
                actual: turn.id,
            });
        }
        if !turn.answer.is_pending() {
            return Err(TranscriptError::AlreadySettled(id));
        }
        turn.answer = answer;
        turn.settled_at = Some(Utc::now());
        Ok(())
    }
}
