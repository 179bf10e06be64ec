//! Kernel module - server infrastructure and dependencies.

pub mod database;
pub mod test_dependencies;

pub use database::{
    create_in_memory_pool, create_pool, run_migrations, schema_status, SchemaStatus,
};
pub use test_dependencies::{MessageCall, MockMessageRepository, MockMessageService};
