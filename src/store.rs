//! In-memory conversation state store

use crate::state_machine::CollectionState;
use std::collections::HashMap;

/// Owns every in-progress collection cycle, keyed by conversation id.
///
/// Deliberately injectable rather than ambient: the runtime holds the only
/// instance and passes it by reference, so the dispatch path can be driven
/// deterministically in tests without a live transport.
#[derive(Debug, Default)]
pub struct StateStore {
    states: HashMap<String, CollectionState>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, chat_id: &str) -> Option<&CollectionState> {
        self.states.get(chat_id)
    }

    /// Insert or overwrite the state for a conversation.
    pub fn set(&mut self, chat_id: impl Into<String>, state: CollectionState) {
        self.states.insert(chat_id.into(), state);
    }

    pub fn remove(&mut self, chat_id: &str) -> Option<CollectionState> {
        self.states.remove(chat_id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
