use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::document_id::{DOCUMENT_ID_MAX_BYTES, DOCUMENT_ID_REGEX};

/// Content kind of a chat message. Unrecognised values deserialize as `Other`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Text,
    Image,
    File,
    Voice,
    #[serde(other)]
    Other,
}

/// Snapshot of a newly created `chats/{chatId}/messages/{messageId}` document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Empty when the document has no sender; every participant then counts as "other".
    #[serde(default)]
    pub sender_id: String,
    #[serde(default)]
    pub sender_name: String,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type", default)]
    pub message_type: MessageType,
}

/// Path parameters of the created message document.
#[derive(Deserialize, Validate, Debug, Clone)]
pub struct MessagePath {
    #[validate(
        custom = "validate_document_id_length",
        regex(path = "DOCUMENT_ID_REGEX", message = "Document ids cannot contain '/'")
    )]
    pub chat_id: String,
    #[validate(
        custom = "validate_document_id_length",
        regex(path = "DOCUMENT_ID_REGEX", message = "Document ids cannot contain '/'")
    )]
    pub message_id: String,
}

// Document ids are limited by their UTF-8 size, not their character count.
fn validate_document_id_length(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() || id.len() > DOCUMENT_ID_MAX_BYTES {
        let mut error = ValidationError::new("length");
        error.message = Some("Document ids must be between 1 and 1500 bytes".into());
        return Err(error);
    }
    Ok(())
}

/// Input of one forwarder invocation.
#[derive(Debug, Clone)]
pub struct MessageCreatedEvent {
    pub chat_id: String,
    pub message_id: String,
    pub message: ChatMessage,
}

impl MessageCreatedEvent {
    pub fn new(path: MessagePath, message: ChatMessage) -> Self {
        Self {
            chat_id: path.chat_id,
            message_id: path.message_id,
            message,
        }
    }
}
