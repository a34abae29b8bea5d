//! Console adapter for development/testing

use async_trait::async_trait;
use tokio::sync::mpsc;
use crate::domain::traits::Bot;
use crate::application::errors::BotError;

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    sender: Option<mpsc::Sender<String>>,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self { sender: None }
    }

    /// Forward replies to a channel instead of stdout
    pub fn with_sender(mut self, sender: mpsc::Sender<String>) -> Self {
        self.sender = Some(sender);
        self
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    fn name(&self) -> &str {
        "console"
    }

    async fn send_message(&self, recipient_id: &str, text: &str) -> Result<String, BotError> {
        match &self.sender {
            Some(sender) => sender
                .send(text.to_string())
                .await
                .map_err(|e| BotError::Internal(e.to_string()))?,
            None => println!("[BOT -> {}] {}", recipient_id, text),
        }
        Ok("console_msg".to_string())
    }
}
