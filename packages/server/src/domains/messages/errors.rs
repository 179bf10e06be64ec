use thiserror::Error;

use crate::common::MessageId;

/// Errors raised by a message repository.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// No live row carries this id
    #[error("message {id} not found")]
    NotFound { id: MessageId },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// A repository failure labelled with the service operation that hit it.
///
/// Renders as `"<operation>: <cause>"`, e.g. `failed to get message: message 3 not found`.
/// The repository error stays reachable through [`std::error::Error::source`], so callers
/// can still ask whether the underlying cause was a missing row.
#[derive(Error, Debug)]
#[error("{operation}: {source}")]
pub struct ServiceError {
    operation: &'static str,
    #[source]
    source: RepositoryError,
}

impl ServiceError {
    pub fn new(operation: &'static str, source: RepositoryError) -> Self {
        Self { operation, source }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn cause(&self) -> &RepositoryError {
        &self.source
    }

    pub fn is_not_found(&self) -> bool {
        self.source.is_not_found()
    }
}
