//! Serialized event loop driving the collection state machine

use super::traits::RecordSink;
use crate::dispatch;
use crate::state_machine::{transition, Effect, IgnoredCue, MessageEvent, StateUpdate};
use crate::store::StateStore;
use tokio::sync::mpsc;

/// Processes inbound message events one at a time against the state store
/// and hands completed records to the sink.
pub struct IntakeRuntime<S: RecordSink> {
    store: StateStore,
    sink: S,
    event_rx: mpsc::Receiver<MessageEvent>,
}

impl<S: RecordSink> IntakeRuntime<S> {
    pub fn new(sink: S, event_rx: mpsc::Receiver<MessageEvent>) -> Self {
        Self {
            store: StateStore::new(),
            sink,
            event_rx,
        }
    }

    /// Run until the event channel closes.
    pub async fn run(mut self) {
        tracing::info!("intake runtime started");
        while let Some(event) = self.event_rx.recv().await {
            self.process_event(event).await;
        }
        tracing::info!(pending = self.store.len(), "intake runtime stopped");
    }

    /// One event to completion, spreadsheet I/O included, before the next.
    async fn process_event(&mut self, event: MessageEvent) {
        let Some(action) = dispatch::action_for(&event) else {
            return;
        };
        let from_operator = event.from_operator;
        let chat_id = event.chat_id;

        match transition(self.store.get(&chat_id), &chat_id, action) {
            Ok(result) => self.apply(&chat_id, result.update, result.effects).await,
            // A counterpart talking outside a collection cycle is routine.
            Err(IgnoredCue::NoActiveCollection) if !from_operator => {
                tracing::debug!(chat_id = %chat_id, "reply with no active collection, dropped");
            }
            Err(cue) => {
                tracing::warn!(chat_id = %chat_id, reason = %cue, "operator cue ignored");
            }
        }
    }

    async fn apply(&mut self, chat_id: &str, update: StateUpdate, effects: Vec<Effect>) {
        match update {
            StateUpdate::Set(state) => {
                tracing::info!(chat_id = %chat_id, stage = ?state.stage, "collection state updated");
                self.store.set(chat_id, state);
            }
            StateUpdate::Keep => {}
        }

        for effect in effects {
            match effect {
                Effect::AppendRecord { record } => {
                    if let Err(err) = self.sink.append(&record).await {
                        // State stays put so the operator can retry the save.
                        tracing::error!(chat_id = %chat_id, error = %err, "failed to persist record");
                        return;
                    }
                    tracing::info!(chat_id = %chat_id, numero = %record.numero, "record persisted");
                }
                Effect::ClearState => {
                    self.store.remove(chat_id);
                }
            }
        }
    }
}
