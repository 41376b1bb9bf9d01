//! Pure transition rules for the collection flow

use super::state::CollectionState;
use super::{Effect, Stage};
use thiserror::Error;

/// Operator cue or counterpart reply, as classified by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Operator asked for the counterpart's name
    StartCollection,
    /// Operator asked for the counterpart's email
    RequestEmail,
    /// Operator issued the save command
    SaveRecord,
    /// Counterpart answered with free text
    CounterpartReply { body: String },
}

/// How the conversation's entry in the state store changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateUpdate {
    Set(CollectionState),
    Keep,
}

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub update: StateUpdate,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(update: StateUpdate) -> Self {
        Self {
            update,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// A cue that matched but whose preconditions were unmet.
///
/// These are reported and recovered locally with a no-op; they never mutate
/// state and never abort event processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IgnoredCue {
    #[error("email requested before a name was collected")]
    EmailBeforeName,
    #[error("save requested but the collected data is incomplete")]
    SaveIncomplete,
    #[error("no collection in progress for this conversation")]
    NoActiveCollection,
}

/// Pure transition function
///
/// Given the same current state and action it always produces the same
/// outcome, with no I/O. The runtime applies the update and runs the effects.
pub fn transition(
    current: Option<&CollectionState>,
    chat_id: &str,
    action: Action,
) -> Result<TransitionResult, IgnoredCue> {
    match (current, action) {
        // Ask-name starts a cycle; re-issuing it discards any in-progress
        // state and restarts from scratch.
        (_, Action::StartCollection) => Ok(TransitionResult::new(StateUpdate::Set(
            CollectionState::start(chat_id),
        ))),

        // Ask-email only advances the stage once a name has been captured.
        (Some(state), Action::RequestEmail) => {
            if state.collected.nome.is_none() {
                return Err(IgnoredCue::EmailBeforeName);
            }
            let mut next = state.clone();
            next.stage = Stage::AwaitingEmail;
            Ok(TransitionResult::new(StateUpdate::Set(next)))
        }
        (None, Action::RequestEmail) => Err(IgnoredCue::NoActiveCollection),

        // Save is valid from either stage as long as both fields are set.
        // The append runs before the clear, so a failed append leaves the
        // state in place for a retry.
        (Some(state), Action::SaveRecord) => match state.to_record() {
            Some(record) => Ok(TransitionResult::new(StateUpdate::Keep)
                .with_effect(Effect::AppendRecord { record })
                .with_effect(Effect::ClearState)),
            None => Err(IgnoredCue::SaveIncomplete),
        },
        (None, Action::SaveRecord) => Err(IgnoredCue::NoActiveCollection),

        // Counterpart replies fill the field the current stage points at,
        // last write wins, no stage advance.
        (Some(state), Action::CounterpartReply { body }) => {
            let mut next = state.clone();
            match next.stage {
                Stage::AwaitingName => next.collected.nome = Some(body),
                Stage::AwaitingEmail => next.collected.email = Some(body),
            }
            Ok(TransitionResult::new(StateUpdate::Set(next)))
        }

        // No implicit state creation from counterpart-originated events.
        (None, Action::CounterpartReply { .. }) => Err(IgnoredCue::NoActiveCollection),
    }
}
