//! Interaction state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.
//! At most one adapter call is outstanding; the gate is the state itself.

mod effect;
mod event;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::SessionState;
pub use transition::transition;
