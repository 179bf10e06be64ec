//! Request and response bodies of the `/api/v1/messages` endpoints.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::MessageId;
use crate::domains::messages::models::{Message, NewMessage};

/// Why a decoded request body was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("author must not be empty")]
    EmptyAuthor,

    #[error("content must not be empty")]
    EmptyContent,
}

/// Shape checks run on a request body after it has been decoded.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Body of `POST /messages` and `PUT /messages/:id`.
///
/// Any `id` field in the body is ignored; on update the id always comes from the path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageRequest {
    pub author: String,
    pub content: String,
}

impl Validate for MessageRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.author.trim().is_empty() {
            return Err(ValidationError::EmptyAuthor);
        }
        if self.content.trim().is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        Ok(())
    }
}

impl MessageRequest {
    pub fn into_new_message(self) -> NewMessage {
        NewMessage::new(self.author, self.content)
    }

    pub fn into_message(self, id: MessageId) -> Message {
        self.into_new_message().with_id(id)
    }
}

/// A single message as returned by `GET /messages/:id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageData {
    pub id: MessageId,
    pub author: String,
    pub content: String,
}

impl From<Message> for MessageData {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            author: message.author,
            content: message.content,
        }
    }
}

/// Body of `GET /messages`; `messages` is `[]` rather than `null` when there are none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageListData {
    pub messages: Vec<MessageData>,
}

impl From<Vec<Message>> for MessageListData {
    fn from(messages: Vec<Message>) -> Self {
        Self {
            messages: messages.into_iter().map(MessageData::from).collect(),
        }
    }
}

/// `{"id": ...}` acknowledgement returned by create, update and delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageIdData {
    pub id: MessageId,
}

impl From<MessageId> for MessageIdData {
    fn from(id: MessageId) -> Self {
        Self { id }
    }
}
