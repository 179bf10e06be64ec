// Guestbook - API Core
//
// This crate provides the backend for a small guestbook: a REST API over a single
// `messages` table plus an embedded single-page front end.
// Layers run handler -> service -> repository, one domain under domains/messages.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
