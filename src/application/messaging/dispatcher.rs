//! Webhook dispatcher - Fans webhook events out to the reply pipeline

use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::application::services::ReplyService;
use crate::domain::entities::OutboundMessage;
use crate::domain::traits::{Bot, SessionStore};
use crate::infrastructure::adapters::messenger::WebhookPayload;
use crate::infrastructure::nlu::Classifier;
use super::parser::WebhookParser;

/// Routes every event of a webhook callback to its own pipeline task
pub struct WebhookDispatcher<B: Bot, C: Classifier, S: SessionStore> {
    parser: WebhookParser,
    service: Arc<ReplyService<B, C, S>>,
}

impl<B, C, S> WebhookDispatcher<B, C, S>
where
    B: Bot + 'static,
    C: Classifier + 'static,
    S: SessionStore + 'static,
{
    pub fn new(service: Arc<ReplyService<B, C, S>>) -> Self {
        let platform = service.bot().name().to_string();
        Self {
            parser: WebhookParser::new(platform),
            service,
        }
    }

    pub fn service(&self) -> &Arc<ReplyService<B, C, S>> {
        &self.service
    }

    /// Spawn one task per event; callers may drop the handles
    pub fn dispatch(&self, payload: &WebhookPayload) -> Vec<JoinHandle<Option<OutboundMessage>>> {
        let messages = self.parser.parse(payload);
        tracing::info!("Received {} messaging events at webhook", messages.len());

        messages
            .into_iter()
            .map(|message| {
                tracing::debug!("[{}] {:?}", message.sender_id, message.content);
                let service = Arc::clone(&self.service);
                tokio::spawn(async move { service.handle_message(message).await })
            })
            .collect()
    }
}
