use crate::application::errors::BotError;
use crate::domain::entities::{message_for_entity, Message, OutboundMessage, FALLBACK_MESSAGE};
use crate::domain::traits::{Bot, SessionStore};
use crate::infrastructure::nlu::{Classification, Classifier};

/// Service turning inbound messages into canned replies.
///
/// Each message runs receive, classify, lookup, send. Failures are logged
/// and dropped; nothing is retried.
pub struct ReplyService<B: Bot, C: Classifier, S: SessionStore> {
    bot: B,
    classifier: C,
    sessions: S,
}

impl<B: Bot, C: Classifier, S: SessionStore> ReplyService<B, C, S> {
    pub fn new(bot: B, classifier: C, sessions: S) -> Self {
        Self { bot, classifier, sessions }
    }

    pub fn bot(&self) -> &B {
        &self.bot
    }

    pub fn sessions(&self) -> &S {
        &self.sessions
    }

    /// Run one inbound message through the pipeline.
    ///
    /// Returns the reply that was handed to the platform, if any.
    pub async fn handle_message(&self, message: Message) -> Option<OutboundMessage> {
        let Some(text) = message.content.text() else {
            tracing::info!(
                "No text in {} event from {}, not forwarding to {}",
                message.content.kind(),
                message.sender_id,
                self.classifier.name()
            );
            return None;
        };

        let session = self.sessions.find_or_create(&message.sender_id).await;

        let classification = match self.classifier.classify(text).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!("Got an error from {}: {}", self.classifier.name(), e);
                return None;
            }
        };

        let reply = self.reply_for(&classification, text);
        self.send_to_session(&session.id, &reply).await
    }

    /// Pick the canned reply for a classification
    pub fn reply_for(&self, classification: &Classification, original_text: &str) -> String {
        let Some(entity) = classification.single_entity() else {
            tracing::info!(
                "Entities for message \"{}\" do not number exactly one: {:?}",
                original_text,
                classification.entity_names()
            );
            return FALLBACK_MESSAGE.to_string();
        };

        tracing::info!("Will send message for entity: {}", entity);
        let reply = message_for_entity(entity);
        if reply.is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            reply
        }
    }

    /// Deliver a reply to whoever owns the session
    pub async fn send_to_session(&self, session_id: &str, text: &str) -> Option<OutboundMessage> {
        let Some(recipient_id) = self.sessions.recipient_for(session_id).await else {
            tracing::error!("Couldn't find user for session: {}", session_id);
            return None;
        };

        match self.respond(&recipient_id, text).await {
            Ok(message_id) => {
                tracing::info!("Sent text message {} to user {}", message_id, recipient_id);
                Some(OutboundMessage::new(recipient_id, text))
            }
            Err(e) => {
                tracing::error!(
                    "An error occurred while forwarding the response to {}: {}",
                    recipient_id,
                    e
                );
                None
            }
        }
    }

    /// Send a response message
    pub async fn respond(&self, recipient_id: &str, text: &str) -> Result<String, BotError> {
        self.bot.send_message(recipient_id, text).await
    }
}
