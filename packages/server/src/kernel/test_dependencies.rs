// TestDependencies - mock implementations for testing
//
// Provides in-memory stand-ins for the message repository and service that record
// every call and can be primed with failures.

use async_trait::async_trait;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use crate::common::MessageId;
use crate::domains::messages::{
    BaseMessageRepository, BaseMessageService, Message, NewMessage, RepositoryError, ServiceError,
};

/// A call received by one of the mocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageCall {
    Create(NewMessage),
    Get(MessageId),
    GetAll,
    Update(Message),
    Delete(MessageId),
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// =============================================================================
// In-memory table shared by both mocks
// =============================================================================

#[derive(Default)]
struct MessageTable {
    last_id: i64,
    rows: BTreeMap<MessageId, Message>,
}

impl MessageTable {
    fn insert(&mut self, message: &NewMessage) -> MessageId {
        self.last_id += 1;
        let id = MessageId::new(self.last_id);
        self.rows.insert(id, message.clone().with_id(id));
        id
    }

    fn get(&self, id: MessageId) -> Result<Message, RepositoryError> {
        self.rows
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound { id })
    }

    fn all(&self) -> Vec<Message> {
        self.rows.values().cloned().collect()
    }

    fn update(&mut self, message: &Message) -> Result<(), RepositoryError> {
        match self.rows.get_mut(&message.id) {
            Some(row) => {
                *row = message.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound { id: message.id }),
        }
    }

    fn delete(&mut self, id: MessageId) {
        self.rows.remove(&id);
    }
}

/// Shared bookkeeping: the table, queued failures and the call log.
struct Recorder<E> {
    table: Mutex<MessageTable>,
    errors: Mutex<VecDeque<E>>,
    calls: Mutex<Vec<MessageCall>>,
}

impl<E> Recorder<E> {
    fn new() -> Self {
        Self {
            table: Mutex::new(MessageTable::default()),
            errors: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Log the call, then hand back the next queued failure if there is one
    fn record(&self, call: MessageCall) -> Option<E> {
        lock(&self.calls).push(call);
        lock(&self.errors).pop_front()
    }

    fn seed(&self, author: &str, content: &str) {
        lock(&self.table).insert(&NewMessage::new(author, content));
    }

    fn push_error(&self, error: E) {
        lock(&self.errors).push_back(error);
    }

    fn calls(&self) -> Vec<MessageCall> {
        lock(&self.calls).clone()
    }
}

// =============================================================================
// Mock Repository
// =============================================================================

/// In-memory repository. Ids start at 1 and are never reused.
pub struct MockMessageRepository {
    inner: Recorder<RepositoryError>,
}

impl MockMessageRepository {
    pub fn new() -> Self {
        Self {
            inner: Recorder::new(),
        }
    }

    /// Pre-insert a message; seeding is not recorded as a call
    pub fn with_message(self, author: &str, content: &str) -> Self {
        self.inner.seed(author, content);
        self
    }

    /// Fail the next call with `error` (queued errors are consumed in order)
    pub fn with_error(self, error: RepositoryError) -> Self {
        self.inner.push_error(error);
        self
    }

    pub fn calls(&self) -> Vec<MessageCall> {
        self.inner.calls()
    }

    pub fn call_count(&self) -> usize {
        self.inner.calls().len()
    }
}

impl Default for MockMessageRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMessageRepository for MockMessageRepository {
    async fn create(&self, message: &NewMessage) -> Result<MessageId, RepositoryError> {
        if let Some(err) = self.inner.record(MessageCall::Create(message.clone())) {
            return Err(err);
        }
        Ok(lock(&self.inner.table).insert(message))
    }

    async fn get(&self, id: MessageId) -> Result<Message, RepositoryError> {
        if let Some(err) = self.inner.record(MessageCall::Get(id)) {
            return Err(err);
        }
        lock(&self.inner.table).get(id)
    }

    async fn get_all(&self) -> Result<Vec<Message>, RepositoryError> {
        if let Some(err) = self.inner.record(MessageCall::GetAll) {
            return Err(err);
        }
        Ok(lock(&self.inner.table).all())
    }

    async fn update(&self, message: &Message) -> Result<(), RepositoryError> {
        if let Some(err) = self.inner.record(MessageCall::Update(message.clone())) {
            return Err(err);
        }
        lock(&self.inner.table).update(message)
    }

    async fn delete(&self, id: MessageId) -> Result<(), RepositoryError> {
        if let Some(err) = self.inner.record(MessageCall::Delete(id)) {
            return Err(err);
        }
        lock(&self.inner.table).delete(id);
        Ok(())
    }
}

// =============================================================================
// Mock Service
// =============================================================================

/// In-memory service for exercising the HTTP layer without storage.
pub struct MockMessageService {
    inner: Recorder<ServiceError>,
}

impl MockMessageService {
    pub fn new() -> Self {
        Self {
            inner: Recorder::new(),
        }
    }

    pub fn with_message(self, author: &str, content: &str) -> Self {
        self.inner.seed(author, content);
        self
    }

    pub fn with_error(self, error: ServiceError) -> Self {
        self.inner.push_error(error);
        self
    }

    /// Fail the next call as storage would when the database is unreachable
    pub fn with_storage_error(self, operation: &'static str) -> Self {
        self.with_error(ServiceError::new(
            operation,
            RepositoryError::Database(sqlx::Error::PoolTimedOut),
        ))
    }

    pub fn calls(&self) -> Vec<MessageCall> {
        self.inner.calls()
    }

    pub fn call_count(&self) -> usize {
        self.inner.calls().len()
    }
}

impl Default for MockMessageService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMessageService for MockMessageService {
    async fn get(&self, id: MessageId) -> Result<Message, ServiceError> {
        if let Some(err) = self.inner.record(MessageCall::Get(id)) {
            return Err(err);
        }
        lock(&self.inner.table)
            .get(id)
            .map_err(|e| ServiceError::new("failed to get message", e))
    }

    async fn get_all(&self) -> Result<Vec<Message>, ServiceError> {
        if let Some(err) = self.inner.record(MessageCall::GetAll) {
            return Err(err);
        }
        Ok(lock(&self.inner.table).all())
    }

    async fn create(&self, message: NewMessage) -> Result<MessageId, ServiceError> {
        if let Some(err) = self.inner.record(MessageCall::Create(message.clone())) {
            return Err(err);
        }
        Ok(lock(&self.inner.table).insert(&message))
    }

    async fn update(&self, message: Message) -> Result<(), ServiceError> {
        if let Some(err) = self.inner.record(MessageCall::Update(message.clone())) {
            return Err(err);
        }
        lock(&self.inner.table)
            .update(&message)
            .map_err(|e| ServiceError::new("failed to update message", e))
    }

    async fn delete(&self, id: MessageId) -> Result<(), ServiceError> {
        if let Some(err) = self.inner.record(MessageCall::Delete(id)) {
            return Err(err);
        }
        lock(&self.inner.table).delete(id);
        Ok(())
    }
}
