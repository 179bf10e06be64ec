use std::sync::Arc;

use async_trait::async_trait;

use crate::common::MessageId;
use crate::domains::messages::errors::ServiceError;
use crate::domains::messages::models::{Message, NewMessage};
use crate::domains::messages::repository::BaseMessageRepository;

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Message operations the HTTP layer depends on.
#[async_trait]
pub trait BaseMessageService: Send + Sync {
    async fn get(&self, id: MessageId) -> Result<Message>;
    async fn get_all(&self) -> Result<Vec<Message>>;
    async fn create(&self, message: NewMessage) -> Result<MessageId>;
    async fn update(&self, message: Message) -> Result<()>;
    async fn delete(&self, id: MessageId) -> Result<()>;
}

/// Delegates to the repository and labels failures with the operation that failed.
///
/// Input is validated before it reaches this layer, so nothing is checked here.
#[derive(Clone)]
pub struct MessageService {
    repository: Arc<dyn BaseMessageRepository>,
}

impl MessageService {
    pub fn new(repository: Arc<dyn BaseMessageRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl BaseMessageService for MessageService {
    async fn get(&self, id: MessageId) -> Result<Message> {
        self.repository
            .get(id)
            .await
            .map_err(|e| ServiceError::new("failed to get message", e))
    }

    async fn get_all(&self) -> Result<Vec<Message>> {
        self.repository
            .get_all()
            .await
            .map_err(|e| ServiceError::new("failed to get all messages", e))
    }

    async fn create(&self, message: NewMessage) -> Result<MessageId> {
        self.repository
            .create(&message)
            .await
            .map_err(|e| ServiceError::new("failed to create message", e))
    }

    async fn update(&self, message: Message) -> Result<()> {
        self.repository
            .update(&message)
            .await
            .map_err(|e| ServiceError::new("failed to update message", e))
    }

    async fn delete(&self, id: MessageId) -> Result<()> {
        self.repository
            .delete(id)
            .await
            .map_err(|e| ServiceError::new("failed to delete message", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::messages::errors::RepositoryError;
    use crate::kernel::test_dependencies::{MessageCall, MockMessageRepository};

    fn service(repo: &Arc<MockMessageRepository>) -> MessageService {
        MessageService::new(repo.clone())
    }

    #[tokio::test]
    async fn get_delegates_to_repository() {
        let repo = Arc::new(MockMessageRepository::new().with_message("Arthur", "Hey, Dutch!"));

        let message = service(&repo).get(MessageId::new(1)).await.unwrap();

        assert_eq!(message.author, "Arthur");
        assert_eq!(repo.calls(), vec![MessageCall::Get(MessageId::new(1))]);
    }

    #[tokio::test]
    async fn get_wraps_not_found_and_keeps_it_testable() {
        let repo = Arc::new(MockMessageRepository::new());

        let err = service(&repo).get(MessageId::new(5)).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "failed to get message: message 5 not found");
    }

    #[tokio::test]
    async fn get_all_wraps_storage_errors() {
        let repo = Arc::new(
            MockMessageRepository::new()
                .with_error(RepositoryError::Database(sqlx::Error::PoolTimedOut)),
        );

        let err = service(&repo).get_all().await.unwrap_err();

        assert!(!err.is_not_found());
        assert_eq!(err.operation(), "failed to get all messages");
        assert!(matches!(err.cause(), RepositoryError::Database(_)));
    }

    #[tokio::test]
    async fn create_returns_the_repository_id() {
        let repo = Arc::new(MockMessageRepository::new().with_message("Sadie", "first"));

        let id = service(&repo)
            .create(NewMessage::new("Arthur", "second"))
            .await
            .unwrap();

        assert_eq!(id, MessageId::new(2));
        assert_eq!(
            repo.calls(),
            vec![MessageCall::Create(NewMessage::new("Arthur", "second"))]
        );
    }

    #[tokio::test]
    async fn create_labels_failures() {
        let repo = Arc::new(
            MockMessageRepository::new()
                .with_error(RepositoryError::Database(sqlx::Error::PoolClosed)),
        );

        let err = service(&repo)
            .create(NewMessage::new("Arthur", "hi"))
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("failed to create message: "));
    }

    #[tokio::test]
    async fn update_passes_not_found_through() {
        let repo = Arc::new(MockMessageRepository::new());

        let err = service(&repo)
            .update(NewMessage::new("Arthur", "hi").with_id(MessageId::new(3)))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.operation(), "failed to update message");
    }

    #[tokio::test]
    async fn delete_delegates_once() {
        let repo = Arc::new(MockMessageRepository::new().with_message("Arthur", "bye"));

        service(&repo).delete(MessageId::new(1)).await.unwrap();

        assert_eq!(repo.calls(), vec![MessageCall::Delete(MessageId::new(1))]);
        assert!(repo.get(MessageId::new(1)).await.is_err());
    }
}
