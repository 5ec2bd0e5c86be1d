use serde::{Deserialize, Serialize};

/// A two-party conversation as stored in the `chats` collection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: String,
    #[serde(default)]
    pub participant_ids: Vec<String>,
}

impl Chat {
    /// Returns the first participant that is not the sender.
    pub fn recipient_of(&self, sender_id: &str) -> Option<&str> {
        self.participant_ids
            .iter()
            .map(String::as_str)
            .find(|id| *id != sender_id)
    }
}
