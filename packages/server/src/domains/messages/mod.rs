pub mod data;
pub mod errors;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use data::{
    MessageData, MessageIdData, MessageListData, MessageRequest, Validate, ValidationError,
};
pub use errors::{RepositoryError, ServiceError};
pub use models::{Message, NewMessage};
pub use repository::{BaseMessageRepository, SqliteMessageRepository};
pub use service::{BaseMessageService, MessageService};
