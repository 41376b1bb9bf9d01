//! Effects produced by state transitions

use super::state::CompletedRecord;

/// Effects to be executed by the runtime after a state transition, in order.
///
/// A failed effect stops execution of the ones after it, so a save that
/// cannot be persisted never clears the conversation's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a completed record to the spreadsheet store
    AppendRecord { record: CompletedRecord },

    /// Remove the conversation's entry from the state store
    ClearState,
}
