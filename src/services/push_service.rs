use async_trait::async_trait;
use thiserror::Error;

use crate::models::notification::NotificationPayload;
use crate::services::jwt_service::JwtError;

#[derive(Error, Debug)]
pub enum PushError {
    #[error("Failed to sign service account assertion: {0}")]
    Assertion(#[from] JwtError),

    #[error("Access token exchange failed with status {status}: {body}")]
    TokenExchange { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Push service rejected the message ({status} {code}): {message}")]
    Rejected { status: u16, code: String, message: String },
}

/// Outbound side of the forwarder: delivers one payload to one device.
#[async_trait]
pub trait PushMessenger: Send + Sync {
    /// Sends the payload and returns the provider's message identifier
    async fn send(&self, payload: &NotificationPayload) -> Result<String, PushError>;
}
