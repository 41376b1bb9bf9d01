//! Collection state types

/// Which field the next counterpart reply should fill.
///
/// Not a strict progress marker: repeated replies in the same stage keep
/// overwriting the same field until the operator advances the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    AwaitingName,
    AwaitingEmail,
}

/// Fields gathered so far for one conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collected {
    pub numero: String,
    pub nome: Option<String>,
    pub email: Option<String>,
}

/// In-progress collection cycle for one conversation.
///
/// Exists only between the operator's ask-name cue and a successful save;
/// the state store owns every instance exclusively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionState {
    pub stage: Stage,
    pub collected: Collected,
}

impl CollectionState {
    /// Fresh cycle for a conversation, with `numero` derived from the chat id.
    pub fn start(chat_id: &str) -> Self {
        Self {
            stage: Stage::AwaitingName,
            collected: Collected {
                numero: chat_number(chat_id),
                nome: None,
                email: None,
            },
        }
    }

    /// Finalize into an immutable record, if both fields were collected.
    pub fn to_record(&self) -> Option<CompletedRecord> {
        Some(CompletedRecord {
            numero: self.collected.numero.clone(),
            nome: self.collected.nome.clone()?,
            email: self.collected.email.clone()?,
        })
    }
}

/// Finalized record handed to the spreadsheet store. All fields required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedRecord {
    pub numero: String,
    pub nome: String,
    pub email: String,
}

/// Chat ids may carry a transport suffix after `@`; the stored number is the
/// bare part before it. Bare ids pass through unchanged.
pub fn chat_number(chat_id: &str) -> String {
    chat_id.split('@').next().unwrap_or(chat_id).to_string()
}
