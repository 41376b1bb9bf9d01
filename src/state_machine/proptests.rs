//! Property-based tests for the collection state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::*;
use crate::dispatch;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_chat_id() -> impl Strategy<Value = String> {
    "[0-9]{11,13}".prop_map(String::from)
}

fn arb_body() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9@. ]{1,40}".prop_map(String::from)
}

fn arb_state(chat_id: &str) -> impl Strategy<Value = CollectionState> {
    let numero = chat_number(chat_id);
    (
        prop_oneof![Just(Stage::AwaitingName), Just(Stage::AwaitingEmail)],
        proptest::option::of(arb_body()),
        proptest::option::of(arb_body()),
    )
        .prop_map(move |(stage, nome, email)| CollectionState {
            stage,
            collected: Collected {
                numero: numero.clone(),
                nome,
                email,
            },
        })
}

fn apply(chat_id: &str, state: &CollectionState, action: Action) -> CollectionState {
    match transition(Some(state), chat_id, action) {
        Ok(result) => match result.update {
            StateUpdate::Set(next) => next,
            StateUpdate::Keep => state.clone(),
        },
        Err(_) => state.clone(),
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Any run of counterpart replies keeps the stage fixed and retains only
    /// the last body; earlier bodies are not retained anywhere.
    #[test]
    fn replies_are_last_write_wins(
        chat_id in arb_chat_id(),
        state in arb_chat_id().prop_flat_map(|id| arb_state(&id)),
        bodies in proptest::collection::vec(arb_body(), 1..8),
    ) {
        let mut current = state.clone();
        for body in &bodies {
            current = apply(&chat_id, &current, Action::CounterpartReply { body: body.clone() });
        }

        prop_assert_eq!(current.stage, state.stage);
        let last = bodies.last().cloned();
        match state.stage {
            Stage::AwaitingName => {
                prop_assert_eq!(current.collected.nome, last);
                prop_assert_eq!(current.collected.email, state.collected.email);
            }
            Stage::AwaitingEmail => {
                prop_assert_eq!(current.collected.email, last);
                prop_assert_eq!(current.collected.nome, state.collected.nome);
            }
        }
    }

    /// Save succeeds exactly when both fields are present, and then produces
    /// an append followed by a clear.
    #[test]
    fn save_gate_matches_field_presence(
        chat_id in arb_chat_id(),
        state in arb_chat_id().prop_flat_map(|id| arb_state(&id)),
    ) {
        let complete = state.collected.nome.is_some() && state.collected.email.is_some();
        match transition(Some(&state), &chat_id, Action::SaveRecord) {
            Ok(result) => {
                prop_assert!(complete);
                prop_assert_eq!(result.update, StateUpdate::Keep);
                prop_assert_eq!(result.effects.len(), 2);
                let appends_first = matches!(result.effects[0], Effect::AppendRecord { .. });
                prop_assert!(appends_first);
                prop_assert_eq!(&result.effects[1], &Effect::ClearState);
            }
            Err(cue) => {
                prop_assert!(!complete);
                prop_assert_eq!(cue, IgnoredCue::SaveIncomplete);
            }
        }
    }

    /// StartCollection always lands in the same fresh state, whatever was
    /// in progress before.
    #[test]
    fn start_collection_is_a_reset(
        chat_id in arb_chat_id(),
        state in proptest::option::of(arb_chat_id().prop_flat_map(|id| arb_state(&id))),
    ) {
        let result = transition(state.as_ref(), &chat_id, Action::StartCollection).unwrap();
        prop_assert!(result.effects.is_empty());
        match result.update {
            StateUpdate::Set(next) => {
                prop_assert_eq!(next, CollectionState::start(&chat_id));
            }
            StateUpdate::Keep => prop_assert!(false, "expected a state update"),
        }
    }

    /// At most one cue fires per operator body, in ask-name, ask-email,
    /// save priority order.
    #[test]
    fn at_most_one_cue_fires(prefix in arb_body(), suffix in arb_body()) {
        let with_name = format!("{prefix}{} {suffix}", dispatch::TRIGGER_ASK_NAME);
        prop_assert_eq!(dispatch::classify(&with_name), Some(dispatch::Cue::AskName));

        let with_both = format!(
            "{} {}",
            dispatch::TRIGGER_ASK_NAME,
            dispatch::TRIGGER_ASK_EMAIL
        );
        prop_assert_eq!(dispatch::classify(&with_both), Some(dispatch::Cue::AskName));
    }

    /// Transitions never touch the numero captured at start.
    #[test]
    fn numero_is_immutable_after_start(
        chat_id in arb_chat_id(),
        bodies in proptest::collection::vec(arb_body(), 0..6),
    ) {
        let mut state = CollectionState::start(&chat_id);
        let numero = state.collected.numero.clone();

        for body in bodies {
            state = apply(&chat_id, &state, Action::CounterpartReply { body });
            state = apply(&chat_id, &state, Action::RequestEmail);
        }

        prop_assert_eq!(state.collected.numero, numero);
    }
}
