use axum::{debug_handler, extract::Path, response::IntoResponse, Extension, Json};
use hyper::StatusCode;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};
use validator::Validate;

use crate::{
    app_state::AppState,
    models::message::{ChatMessage, MessageCreatedEvent, MessagePath},
};

#[derive(Serialize, Debug)]
pub struct TriggerResponse {
    pub delivered: bool,
    pub response: Option<String>,
}

/// Entry point for `chats/{chatId}/messages/{messageId}` creation events.
///
/// Forwarder failures never turn into an error status; the caller only
/// learns whether a notification went out.
#[debug_handler]
pub async fn message_created(
    Extension(state): Extension<AppState>,
    Path(path): Path<MessagePath>,
    Json(message): Json<ChatMessage>,
) -> impl IntoResponse {
    if let Err(errors) = path.validate() {
        warn!("Rejecting trigger with invalid document path: {}", errors);
        return (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response();
    }

    debug!(
        "Message {} created in chat {} by {}",
        path.message_id, path.chat_id, message.sender_id
    );

    let event = MessageCreatedEvent::new(path, message);
    let response = state.forwarder.forward(&event).await;

    Json(TriggerResponse {
        delivered: response.is_some(),
        response,
    })
    .into_response()
}
