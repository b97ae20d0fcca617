//! Property-based tests for the session state machine
//!
//! Events are applied to a real transcript the way the runtime applies
//! them, and the transcript invariants are checked after every step.

use super::transition::TransitionError;
use super::*;
use crate::adapter::{AdapterError, AdapterReply};
use crate::provision::ProvisionResult;
use crate::transcript::{Answer, Transcript, Turn, TurnId};
use proptest::prelude::*;
use serde_json::json;

// ============================================================================
// Test Helpers
// ============================================================================

/// Apply effects to the transcript like the runtime does
fn apply(transcript: &mut Transcript, effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::AppendTurn { turn_id, query } => transcript.append(*turn_id, query.clone()),
            Effect::SettleTurn { turn_id, answer } => {
                transcript.settle_last(*turn_id, answer.clone()).unwrap();
            }
            Effect::SendQuery { .. } | Effect::NotifyDisplay => {}
        }
    }
}

/// What the simulated adapter does with a submission
#[derive(Debug, Clone)]
enum Settlement {
    Text(String),
    Structured(String),
    Failure(String),
}

impl Settlement {
    fn into_event(self, turn_id: TurnId) -> Event {
        match self {
            Settlement::Text(text) => Event::ReplyReceived {
                turn_id,
                reply: AdapterReply::Text(text),
            },
            Settlement::Structured(name) => Event::ReplyReceived {
                turn_id,
                reply: AdapterReply::Structured(
                    ProvisionResult::from_value(json!({
                        "status": "success",
                        "server_name": name,
                    }))
                    .unwrap(),
                ),
            },
            Settlement::Failure(message) => Event::ReplyFailed {
                turn_id,
                error: AdapterError::remote(500, message),
            },
        }
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_query() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z ]{0,29}"
}

fn arb_settlement() -> impl Strategy<Value = Settlement> {
    prop_oneof![
        "[a-zA-Z ]{0,30}".prop_map(Settlement::Text),
        "[a-z]{1,10}".prop_map(Settlement::Structured),
        "[a-zA-Z][a-zA-Z ]{0,29}".prop_map(Settlement::Failure),
    ]
}

/// A user action interleaved with adapter completions
#[derive(Debug, Clone)]
enum Step {
    Submit(String),
    Settle(Settlement),
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        arb_query().prop_map(Step::Submit),
        "[ \t]{0,3}".prop_map(Step::Submit),
        arb_settlement().prop_map(Step::Settle),
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Sequential submissions: one turn each, in submission order, all settled
    #[test]
    fn prop_sequential_submissions_keep_order(
        rounds in proptest::collection::vec((arb_query(), arb_settlement()), 0..15)
    ) {
        let mut state = SessionState::Idle;
        let mut transcript = Transcript::new();

        for (query, settlement) in &rounds {
            let turn_id = TurnId::new();
            let submit = Event::Submit { turn_id, query: query.clone() };
            let result = transition(&state, submit).unwrap();
            apply(&mut transcript, &result.effects);
            state = result.new_state;
            prop_assert!(state.is_busy());

            let reply = settlement.clone().into_event(turn_id);
            let result = transition(&state, reply).unwrap();
            apply(&mut transcript, &result.effects);
            state = result.new_state;
            prop_assert!(!state.is_busy());
        }

        prop_assert_eq!(transcript.len(), rounds.len());
        for (turn, (query, _)) in transcript.turns().iter().zip(&rounds) {
            prop_assert_eq!(turn.query(), query.as_str());
            prop_assert!(!turn.answer().is_pending());
            prop_assert!(turn.kind().is_some());
        }
    }

    // A submission while busy changes nothing
    #[test]
    fn prop_busy_submission_is_noop(first in arb_query(), second in arb_query()) {
        let mut transcript = Transcript::new();
        let result = transition(
            &SessionState::Idle,
            Event::Submit { turn_id: TurnId::new(), query: first },
        ).unwrap();
        apply(&mut transcript, &result.effects);
        let state = result.new_state;
        let before = transcript.clone();

        let second = Event::Submit { turn_id: TurnId::new(), query: second };
        let rejected = transition(&state, second);
        prop_assert_eq!(rejected.unwrap_err(), TransitionError::Busy);
        prop_assert_eq!(transcript, before);
    }

    // Arbitrary interleavings: only the pending turn is ever written, at most
    // one turn is pending, and it is always the last
    #[test]
    fn prop_interleavings_preserve_invariants(
        steps in proptest::collection::vec(arb_step(), 0..30)
    ) {
        let mut state = SessionState::Idle;
        let mut transcript = Transcript::new();
        let mut accepted = 0usize;

        for step in steps {
            let event = match step {
                Step::Submit(query) => Event::Submit { turn_id: TurnId::new(), query },
                // Replies target whatever is pending, or a stranger when idle
                Step::Settle(settlement) => {
                    let turn_id = state.pending_turn().unwrap_or_default();
                    settlement.into_event(turn_id)
                }
            };
            let is_submit = matches!(event, Event::Submit { .. });

            if let Ok(result) = transition(&state, event) {
                if is_submit {
                    accepted += 1;
                }
                apply(&mut transcript, &result.effects);
                state = result.new_state;
            }

            prop_assert_eq!(transcript.len(), accepted);
            let pending: Vec<_> = transcript
                .turns()
                .iter()
                .enumerate()
                .filter(|(_, t)| t.answer().is_pending())
                .map(|(i, _)| i)
                .collect();
            prop_assert!(pending.len() <= 1);
            if let Some(&index) = pending.first() {
                prop_assert_eq!(index, transcript.len() - 1);
                prop_assert_eq!(state.pending_turn(), transcript.last().map(Turn::id));
            } else {
                prop_assert!(!state.is_busy());
            }
        }
    }

    // Settlement never leaves a turn pending, and the answer kind follows the reply
    #[test]
    fn prop_settlement_is_terminal(query in arb_query(), settlement in arb_settlement()) {
        let turn_id = TurnId::new();
        let mut transcript = Transcript::new();
        let result = transition(&SessionState::Idle, Event::Submit { turn_id, query }).unwrap();
        apply(&mut transcript, &result.effects);

        let reply = settlement.clone().into_event(turn_id);
        let result = transition(&result.new_state, reply).unwrap();
        apply(&mut transcript, &result.effects);

        let answer = transcript.last().unwrap().answer();
        match settlement {
            Settlement::Text(text) => prop_assert_eq!(answer, &Answer::Text(text)),
            Settlement::Structured(_) => prop_assert!(matches!(answer, Answer::Structured(_))),
            Settlement::Failure(message) => prop_assert_eq!(answer, &Answer::ErrorText(message)),
        }
    }
}
