//! Session runtime executor

use super::SessionSnapshot;
use crate::adapter::{AdapterError, AdapterService};
use crate::session::{transition, Effect, Event, SessionState};
use crate::transcript::{Transcript, Turn, TurnId};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Session runtime, generic over the adapter implementation
pub struct SessionRuntime<A: AdapterService + 'static> {
    state: SessionState,
    transcript: Transcript,
    adapter: Arc<A>,
    event_rx: mpsc::Receiver<Event>,
    /// Weak so the loop ends once every handle is gone and nothing is in flight
    event_tx: mpsc::WeakSender<Event>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl<A: AdapterService + 'static> SessionRuntime<A> {
    pub fn new(
        adapter: A,
        event_rx: mpsc::Receiver<Event>,
        event_tx: mpsc::WeakSender<Event>,
        snapshot_tx: watch::Sender<SessionSnapshot>,
    ) -> Self {
        Self {
            state: SessionState::Idle,
            transcript: Transcript::new(),
            adapter: Arc::new(adapter),
            event_rx,
            event_tx,
            snapshot_tx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(
            endpoint = %self.adapter.endpoint(),
            "Starting session runtime"
        );

        while let Some(event) = self.event_rx.recv().await {
            self.process_event(event);
        }

        tracing::info!(turns = self.transcript.len(), "Session runtime stopped");
    }

    fn process_event(&mut self, event: Event) {
        let turn_id = event.turn_id();
        let result = match transition(&self.state, event) {
            Ok(r) => r,
            Err(e) => {
                // Rejected submissions are dropped without telling the user
                tracing::debug!(
                    %turn_id,
                    pending = ?self.state.pending_turn(),
                    reason = %e,
                    "Event rejected"
                );
                return;
            }
        };

        self.state = result.new_state;
        for effect in result.effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AppendTurn { turn_id, query } => {
                tracing::info!(%turn_id, query_len = query.len(), "Turn submitted");
                self.transcript.append(turn_id, query);
            }

            Effect::SendQuery { turn_id, query } => self.send_query(turn_id, query),

            Effect::SettleTurn { turn_id, answer } => {
                if let Err(e) = self.transcript.settle_last(turn_id, answer) {
                    tracing::error!(%turn_id, error = %e, "Failed to settle turn");
                    return;
                }
                let kind = self.transcript.last().and_then(Turn::kind);
                tracing::info!(%turn_id, ?kind, "Turn settled");
            }

            Effect::NotifyDisplay => {
                self.snapshot_tx.send_replace(SessionSnapshot {
                    transcript: self.transcript.clone(),
                    busy: self.state.is_busy(),
                });
            }
        }
    }

    /// Spawn the one outbound call; its outcome comes back as an event
    fn send_query(&mut self, turn_id: TurnId, query: String) {
        let Some(event_tx) = self.event_tx.upgrade() else {
            // Nobody can deliver the reply; settle now rather than stay pending
            tracing::warn!(%turn_id, "Event channel closed before the call was issued");
            self.process_event(Event::ReplyFailed {
                turn_id,
                error: AdapterError::transport("Session closed before the request was sent"),
            });
            return;
        };
        let adapter = self.adapter.clone();

        tokio::spawn(async move {
            let event = match adapter.chat(&query).await {
                Ok(reply) => Event::ReplyReceived { turn_id, reply },
                Err(error) => Event::ReplyFailed { turn_id, error },
            };
            if event_tx.send(event).await.is_err() {
                tracing::warn!(%turn_id, "Session runtime stopped before reply arrived");
            }
        });
    }
}
