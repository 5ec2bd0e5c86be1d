use std::collections::BTreeMap;

use serde::Serialize;

use super::message::{ChatMessage, MessageCreatedEvent, MessageType};

pub const NEW_MESSAGE_KIND: &str = "new_message";
pub const DEFAULT_SOUND: &str = "default";

pub const IMAGE_PLACEHOLDER: &str = "📷 Image";
pub const FILE_PLACEHOLDER: &str = "📎 File";
pub const VOICE_PLACEHOLDER: &str = "🎤 Voice message";

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub sound: String,
}

/// One push notification addressed to a single device. Built per invocation, never stored.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NotificationPayload {
    pub notification: NotificationContent,
    pub data: BTreeMap<String, String>,
    pub token: String,
}

impl NotificationPayload {
    pub fn for_message(event: &MessageCreatedEvent, token: &str) -> Self {
        let message = &event.message;

        let mut data = BTreeMap::new();
        data.insert("chatId".to_string(), event.chat_id.clone());
        data.insert("messageId".to_string(), event.message_id.clone());
        data.insert("senderId".to_string(), message.sender_id.clone());
        data.insert("type".to_string(), NEW_MESSAGE_KIND.to_string());

        Self {
            notification: NotificationContent {
                title: message.sender_name.clone(),
                body: notification_body(message),
                sound: DEFAULT_SOUND.to_string(),
            },
            data,
            token: token.to_string(),
        }
    }
}

/// Human readable body for a message. Attachments get a placeholder label,
/// everything else shows the raw content.
pub fn notification_body(message: &ChatMessage) -> String {
    match message.message_type {
        MessageType::Image => IMAGE_PLACEHOLDER.to_string(),
        MessageType::File => FILE_PLACEHOLDER.to_string(),
        MessageType::Voice => VOICE_PLACEHOLDER.to_string(),
        MessageType::Text | MessageType::Other => message.content.clone(),
    }
}
