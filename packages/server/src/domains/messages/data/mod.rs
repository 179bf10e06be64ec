pub mod message;

pub use message::{
    MessageData, MessageIdData, MessageListData, MessageRequest, Validate, ValidationError,
};
