use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::{
    models::{message::MessageCreatedEvent, notification::NotificationPayload},
    repositories::document_repository::{DocumentStore, StoreError},
    services::push_service::{PushError, PushMessenger},
    utils::document_id::redact_token,
};

#[derive(Error, Debug)]
pub enum ForwardError {
    #[error("Document store lookup failed: {0}")]
    Store(#[from] StoreError),
    #[error("Push send failed: {0}")]
    Push(#[from] PushError),
}

/// Why an invocation ended without sending anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    ChatNotFound,
    NoRecipient,
    RecipientNotFound,
    MissingToken,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SkipReason::ChatNotFound => "Chat not found",
                SkipReason::NoRecipient => "No recipient found",
                SkipReason::RecipientNotFound => "User not found",
                SkipReason::MissingToken => "No FCM token for user",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardOutcome {
    /// The push service accepted the message and returned this identifier
    Sent(String),
    Skipped(SkipReason),
}

/// Turns a newly created chat message into a push notification for the other participant.
///
/// Stateless apart from the two shared handles; every invocation performs
/// its lookups in order and sends at most once.
pub struct NotificationForwarder {
    store: Arc<dyn DocumentStore>,
    messenger: Arc<dyn PushMessenger>,
}

impl NotificationForwarder {
    pub fn new(store: Arc<dyn DocumentStore>, messenger: Arc<dyn PushMessenger>) -> Self {
        Self { store, messenger }
    }

    /// Handles one creation event. Returns the push response id, or `None`
    /// when nothing was sent, whether skipped or failed.
    pub async fn forward(&self, event: &MessageCreatedEvent) -> Option<String> {
        match self.try_forward(event).await {
            Ok(ForwardOutcome::Sent(response)) => {
                log::info!(
                    "Notification sent successfully for message {} in chat {}: {}",
                    event.message_id,
                    event.chat_id,
                    response
                );
                Some(response)
            }
            Ok(ForwardOutcome::Skipped(reason)) => {
                log::info!(
                    "{}; skipping notification for message {} in chat {}",
                    reason,
                    event.message_id,
                    event.chat_id
                );
                None
            }
            Err(e) => {
                log::error!(
                    "Error sending notification for message {} in chat {}: {}",
                    event.message_id,
                    event.chat_id,
                    e
                );
                None
            }
        }
    }

    /// Same chain as [`forward`](Self::forward) with the reason kept.
    pub async fn try_forward(
        &self,
        event: &MessageCreatedEvent,
    ) -> Result<ForwardOutcome, ForwardError> {
        let sender_id = event.message.sender_id.as_str();

        let chat = match self.store.find_chat(&event.chat_id).await? {
            Some(chat) => chat,
            None => return Ok(ForwardOutcome::Skipped(SkipReason::ChatNotFound)),
        };

        let recipient_id = match chat.recipient_of(sender_id) {
            Some(id) => id,
            None => return Ok(ForwardOutcome::Skipped(SkipReason::NoRecipient)),
        };

        let recipient = match self.store.find_user(recipient_id).await? {
            Some(user) => user,
            None => return Ok(ForwardOutcome::Skipped(SkipReason::RecipientNotFound)),
        };

        let token = match recipient.device_token() {
            Some(token) => token,
            None => return Ok(ForwardOutcome::Skipped(SkipReason::MissingToken)),
        };

        let payload = NotificationPayload::for_message(event, token);
        log::debug!(
            "Sending notification to {} ({})",
            recipient_id,
            redact_token(token)
        );

        let response = self.messenger.send(&payload).await?;
        Ok(ForwardOutcome::Sent(response))
    }
}
