//! Trigger classification for inbound events
//!
//! The authorship trust model lives at this boundary: only operator-authored
//! bodies are checked against the cue vocabulary, and at most one cue fires
//! per message. Counterpart messages always route to the reply handler.

use crate::state_machine::{Action, MessageEvent};

/// Operator message must contain this to start (or restart) a collection.
pub const TRIGGER_ASK_NAME: &str = "Por favor, informe seu nome";
/// Operator message must contain this to advance to email collection.
pub const TRIGGER_ASK_EMAIL: &str = "Por favor, informe seu email";
/// Operator message must equal this (case-insensitive) to persist the record.
pub const TRIGGER_SAVE: &str = "!excel";

/// Operator cue, in firing priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    AskName,
    AskEmail,
    Save,
}

/// Classify an operator-authored body against the cue vocabulary.
///
/// The two ask cues match by case-sensitive substring, the save command by
/// case-insensitive equality on the whole body. First match wins.
pub fn classify(body: &str) -> Option<Cue> {
    if body.contains(TRIGGER_ASK_NAME) {
        return Some(Cue::AskName);
    }
    if body.contains(TRIGGER_ASK_EMAIL) {
        return Some(Cue::AskEmail);
    }
    if body.eq_ignore_ascii_case(TRIGGER_SAVE) {
        return Some(Cue::Save);
    }
    None
}

/// Map an inbound event to a state-machine action, if it warrants one.
///
/// Operator messages with no cue are ordinary conversation and map to
/// nothing. Bodies are trimmed before matching and before capture.
pub fn action_for(event: &MessageEvent) -> Option<Action> {
    let body = event.body.trim();
    if event.from_operator {
        classify(body).map(|cue| match cue {
            Cue::AskName => Action::StartCollection,
            Cue::AskEmail => Action::RequestEmail,
            Cue::Save => Action::SaveRecord,
        })
    } else {
        Some(Action::CounterpartReply {
            body: body.to_string(),
        })
    }
}
