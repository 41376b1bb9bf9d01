//! Inbound message events

use serde::{Deserialize, Serialize};

/// One inbound chat message, reduced to the three facts the core reads.
///
/// The messaging transport produces these; everything richer (media, quoted
/// messages, delivery receipts) is dropped at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEvent {
    /// Stable opaque key for the two-party chat this message belongs to.
    pub chat_id: String,
    pub body: String,
    /// True when the operator authored the message. Only operator-authored
    /// messages may fire cues.
    pub from_operator: bool,
}

impl MessageEvent {
    #[allow(dead_code)] // Useful for tests
    pub fn new(chat_id: impl Into<String>, body: impl Into<String>, from_operator: bool) -> Self {
        Self {
            chat_id: chat_id.into(),
            body: body.into(),
            from_operator,
        }
    }
}
