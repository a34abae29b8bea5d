//! Webhook parser - Turns platform callbacks into structured messages

use chrono::{DateTime, Utc};
use crate::domain::entities::{Content, Message};
use crate::infrastructure::adapters::messenger::{MessagingEvent, WebhookPayload};

/// Parses webhook payloads into Message objects
pub struct WebhookParser {
    platform: String,
}

impl WebhookParser {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
        }
    }

    /// All messaging events of all entries, in delivery order
    pub fn parse(&self, payload: &WebhookPayload) -> Vec<Message> {
        payload
            .entry
            .iter()
            .flat_map(|entry| entry.messaging.iter())
            .map(|event| self.parse_event(event))
            .collect()
    }

    /// Parse a single messaging event
    pub fn parse_event(&self, event: &MessagingEvent) -> Message {
        let sender_id = event
            .sender
            .as_ref()
            .map(|s| s.id.as_str())
            .filter(|id| !id.is_empty());

        let content = match (&event.message, &event.postback) {
            // Nobody to answer
            _ if sender_id.is_none() => Content::Empty,
            // Echoes of our own replies must never be answered
            (Some(message), _) if message.is_echo => Content::Empty,
            (Some(message), _) => match (&message.text, message.attachments.first()) {
                (Some(text), _) if !text.is_empty() => Content::Text(text.clone()),
                (_, Some(attachment)) => Content::Attachment(attachment.kind.clone()),
                _ => Content::Empty,
            },
            (None, Some(postback)) => Content::Postback(postback.payload.clone().unwrap_or_default()),
            (None, None) => Content::Empty,
        };

        let mut message = Message::new(sender_id.unwrap_or_default(), content).with_platform(&self.platform);

        if let Some(mid) = event.message.as_ref().and_then(|m| m.mid.as_ref()) {
            message = message.with_id(mid);
        }
        if let Some(recipient) = &event.recipient {
            message = message.with_recipient(&recipient.id);
        }
        if let Some(timestamp) = event.timestamp.and_then(DateTime::<Utc>::from_timestamp_millis) {
            message = message.with_timestamp(timestamp);
        }

        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: serde_json::Value) -> WebhookPayload {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_parse_text_event() {
        let parser = WebhookParser::new("messenger");
        let messages = parser.parse(&payload(serde_json::json!({
            "object": "page",
            "entry": [{ "messaging": [{
                "sender": { "id": "USER" },
                "recipient": { "id": "PAGE" },
                "timestamp": 1458692752478i64,
                "message": { "mid": "mid.1", "text": "what is aids" }
            }]}]
        })));

        assert_eq!(messages.len(), 1);
        let msg = &messages[0];
        assert_eq!(msg.id, "mid.1");
        assert_eq!(msg.sender_id, "USER");
        assert_eq!(msg.recipient_id, "PAGE");
        assert_eq!(msg.platform, "messenger");
        assert_eq!(msg.content, Content::Text("what is aids".into()));
        assert_eq!(msg.timestamp.timestamp_millis(), 1458692752478);
    }

    #[test]
    fn test_parse_non_text_events() {
        let parser = WebhookParser::new("messenger");
        let messages = parser.parse(&payload(serde_json::json!({
            "object": "page",
            "entry": [
                { "messaging": [
                    { "sender": { "id": "A" }, "message": { "attachments": [{ "type": "image" }] } },
                    { "sender": { "id": "A" }, "postback": { "payload": "GET_STARTED" } }
                ]},
                { "messaging": [
                    { "sender": { "id": "PAGE" }, "message": { "text": "HIV causes AIDS", "is_echo": true } },
                    { "sender": { "id": "A" }, "delivery": { "watermark": 1 } }
                ]}
            ]
        })));

        let contents: Vec<_> = messages.into_iter().map(|m| m.content).collect();
        assert_eq!(contents, vec![
            Content::Attachment("image".into()),
            Content::Postback("GET_STARTED".into()),
            Content::Empty,
            Content::Empty,
        ]);
    }

    #[test]
    fn test_senderless_event_does_not_spoil_batch() {
        let parser = WebhookParser::new("messenger");
        let messages = parser.parse(&payload(serde_json::json!({
            "object": "page",
            "entry": [{ "messaging": [
                { "sender": { "id": "USER" }, "recipient": { "id": "PAGE" }, "message": { "text": "what is hiv" } },
                { "recipient": { "id": "PAGE" }, "timestamp": 1458692752478i64, "optin": { "ref": "x", "user_ref": "UREF" } },
                { "sender": {}, "message": { "text": "who am i" } }
            ]}]
        })));

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].content, Content::Text("what is hiv".into()));
        assert_eq!(messages[1].content, Content::Empty);
        assert_eq!(messages[1].sender_id, "");
        assert_eq!(messages[2].content, Content::Empty);
    }

    #[test]
    fn test_parse_empty_payload() {
        let parser = WebhookParser::new("messenger");
        assert!(parser.parse(&payload(serde_json::json!({ "object": "page" }))).is_empty());
    }
}
