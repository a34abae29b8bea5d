use async_trait::async_trait;
use crate::application::errors::BotError;

/// Bot trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Bot: Send + Sync {
    /// Platform name, used in logs
    fn name(&self) -> &str;

    /// Send a text message to a recipient, returning the platform message id
    async fn send_message(&self, recipient_id: &str, text: &str) -> Result<String, BotError>;
}
