use async_trait::async_trait;
use crate::domain::entities::Session;

/// Session store - maps session ids to the recipients they belong to
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Existing session for a recipient, or a freshly created one
    async fn find_or_create(&self, recipient_id: &str) -> Session;

    async fn recipient_for(&self, session_id: &str) -> Option<String>;

    async fn remove(&self, session_id: &str) -> Option<Session>;

    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
