//! Core collection state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

mod effect;
pub mod event;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::MessageEvent;
pub use state::{chat_number, Collected, CollectionState, CompletedRecord, Stage};
pub use transition::{transition, Action, IgnoredCue, StateUpdate};
