use chrono::{DateTime, Utc};

/// Message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    /// Non-text payload, carrying the attachment type ("image", "audio", ...)
    Attachment(String),
    Postback(String),
    Empty,
}

impl Content {
    pub fn text(&self) -> Option<&str> {
        match self {
            Content::Text(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Content::Text(_) => "text",
            Content::Attachment(_) => "attachment",
            Content::Postback(_) => "postback",
            Content::Empty => "empty",
        }
    }
}

/// Represents an incoming message delivered by the platform webhook
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub content: Content,
    pub timestamp: DateTime<Utc>,
    pub platform: String,
}

impl Message {
    pub fn new(sender_id: impl Into<String>, content: Content) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender_id: sender_id.into(),
            recipient_id: String::new(),
            content,
            timestamp: Utc::now(),
            platform: "unknown".to_string(),
        }
    }

    pub fn from_text(sender_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(sender_id, Content::Text(text.into()))
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_recipient(mut self, recipient_id: impl Into<String>) -> Self {
        self.recipient_id = recipient_id.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }
}

/// A reply on its way back to the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub recipient_id: String,
    pub text: String,
}

impl OutboundMessage {
    pub fn new(recipient_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            recipient_id: recipient_id.into(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_content() {
        let msg = Message::from_text("123", "what is hiv");
        assert_eq!(msg.content.text(), Some("what is hiv"));
        assert_eq!(msg.content.kind(), "text");
        assert_eq!(msg.sender_id, "123");
    }

    #[test]
    fn test_empty_text_is_not_text() {
        assert_eq!(Content::Text(String::new()).text(), None);
        assert_eq!(Content::Attachment("image".into()).text(), None);
        assert_eq!(Content::Empty.text(), None);
    }
}
