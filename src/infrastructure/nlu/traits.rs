//! NLU traits - Text classification interface

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One candidate value the NLU found for an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityValue {
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

/// Classification of a single utterance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Provider-assigned message id
    #[serde(default)]
    pub msg_id: Option<String>,
    /// The text that was classified
    #[serde(default, rename = "_text", alias = "text")]
    pub text: Option<String>,
    /// Entities keyed by name
    #[serde(default)]
    pub entities: BTreeMap<String, Vec<EntityValue>>,
}

impl Classification {
    /// Entity name when exactly one entity was recognized
    pub fn single_entity(&self) -> Option<&str> {
        if self.entities.len() != 1 {
            return None;
        }
        self.entities.keys().next().map(String::as_str)
    }

    pub fn entity_names(&self) -> Vec<&str> {
        self.entities.keys().map(String::as_str).collect()
    }

    /// Highest confidence reported for an entity
    pub fn confidence(&self, entity: &str) -> Option<f64> {
        self.entities
            .get(entity)?
            .iter()
            .filter_map(|v| v.confidence)
            .fold(None, |best, c| Some(best.map_or(c, |b: f64| b.max(c))))
    }
}

/// NLU errors
#[derive(Debug)]
pub enum NluError {
    /// Server token missing
    MissingToken,
    /// API error from provider
    ApiError(String),
    /// Network error
    NetworkError(String),
    /// Rate limited
    RateLimited,
    /// Parse error
    ParseError(String),
}

impl std::fmt::Display for NluError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NluError::MissingToken => write!(f, "Missing server token"),
            NluError::ApiError(msg) => write!(f, "API error: {}", msg),
            NluError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            NluError::RateLimited => write!(f, "Rate limited"),
            NluError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for NluError {}

/// Result type for NLU operations
pub type NluResult<T> = Result<T, NluError>;

/// Classifier trait
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Classify a free-text message
    async fn classify(&self, text: &str) -> NluResult<Classification>;
}
