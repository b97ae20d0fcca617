//! Runtime for executing a chat session
//!
//! Owns the session state and transcript, applies the pure transition
//! function and executes the resulting effects. The display surface sees
//! the transcript only through [`SessionSnapshot`]s.

mod executor;

#[cfg(test)]
pub mod testing;

pub use executor::SessionRuntime;

use crate::adapter::AdapterService;
use crate::session::Event;
use crate::transcript::{Transcript, TurnId};
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

const EVENT_CHANNEL_CAPACITY: usize = 32;

/// What the display surface renders: the transcript plus the input gate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub transcript: Transcript,
    pub busy: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Session runtime has stopped")]
    Stopped,
}

/// Handle to interact with a running session
#[derive(Clone)]
pub struct SessionHandle {
    event_tx: mpsc::Sender<Event>,
    snapshot_rx: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    /// Submit a query.
    ///
    /// The runtime drops the submission silently when the query is blank or a
    /// call is already in flight; the returned id then never shows up in the
    /// transcript.
    pub async fn submit(&self, query: impl Into<String>) -> Result<TurnId, RuntimeError> {
        let turn_id = TurnId::new();
        self.event_tx
            .send(Event::Submit {
                turn_id,
                query: query.into(),
            })
            .await
            .map_err(|_| RuntimeError::Stopped)?;
        Ok(turn_id)
    }

    /// True while a submission's call has not settled
    pub fn is_busy(&self) -> bool {
        self.snapshot_rx.borrow().busy
    }

    #[allow(dead_code)] // Used by tests
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver notified on every transcript change
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Wait until the turn `turn_id` holds a terminal answer
    pub async fn wait_settled(&self, turn_id: TurnId) -> Result<SessionSnapshot, RuntimeError> {
        let mut rx = self.snapshot_rx.clone();
        let snapshot = rx
            .wait_for(|s| {
                s.transcript
                    .turns()
                    .iter()
                    .any(|t| t.id() == turn_id && !t.answer().is_pending())
            })
            .await
            .map_err(|_| RuntimeError::Stopped)?;
        Ok(snapshot.clone())
    }
}

/// Start a session runtime on the current tokio runtime
pub fn spawn<A: AdapterService + 'static>(adapter: A) -> (SessionHandle, JoinHandle<()>) {
    let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let (snapshot_tx, snapshot_rx) = watch::channel(SessionSnapshot::default());

    let runtime = SessionRuntime::new(adapter, event_rx, event_tx.downgrade(), snapshot_tx);
    let task = tokio::spawn(runtime.run());

    (
        SessionHandle {
            event_tx,
            snapshot_rx,
        },
        task,
    )
}
