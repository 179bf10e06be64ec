// Common types shared across the application

pub mod id;

pub use id::MessageId;
