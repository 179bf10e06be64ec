use serde::{Deserialize, Serialize};

use crate::common::MessageId;

/// A guestbook entry as the rest of the application sees it.
///
/// `id` is assigned by storage on insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub author: String,
    pub content: String,
}

/// A message that has not been stored yet, so it has no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    pub author: String,
    pub content: String,
}

impl NewMessage {
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            content: content.into(),
        }
    }

    /// Attaches the id storage assigned to this message.
    pub fn with_id(self, id: MessageId) -> Message {
        Message {
            id,
            author: self.author,
            content: self.content,
        }
    }
}
