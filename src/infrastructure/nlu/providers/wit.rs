//! Wit.ai Provider - Intent classification

use async_trait::async_trait;
use reqwest::Client;

use crate::infrastructure::config::NluConfig;
use crate::infrastructure::nlu::{Classification, Classifier, NluError, NluResult};

/// Wit.ai API endpoint
const API_BASE: &str = "https://api.wit.ai";

/// Wit.ai API version pinned via the `v` query parameter
const API_VERSION: &str = "20160526";

/// Wit.ai provider
pub struct WitProvider {
    server_token: String,
    client: Client,
    api_base: String,
    api_version: String,
}

impl WitProvider {
    pub fn new(server_token: impl Into<String>) -> Self {
        Self {
            server_token: server_token.into(),
            client: Client::new(),
            api_base: API_BASE.to_string(),
            api_version: API_VERSION.to_string(),
        }
    }

    pub fn from_config(config: &NluConfig) -> NluResult<Self> {
        let token = config
            .server_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(NluError::MissingToken)?;

        Ok(Self::new(token)
            .with_api_base(&config.api_base)
            .with_api_version(&config.api_version))
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Get URL for the message endpoint
    fn message_url(&self) -> String {
        format!("{}/message", self.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl Classifier for WitProvider {
    fn name(&self) -> &str {
        "wit"
    }

    async fn classify(&self, text: &str) -> NluResult<Classification> {
        tracing::debug!("Classifying via wit: {}", text);

        let response = self.client
            .get(self.message_url())
            .query(&[("v", self.api_version.as_str()), ("q", text)])
            .bearer_auth(&self.server_token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| NluError::NetworkError(e.to_string()))?;

        if response.status() == 429 {
            return Err(NluError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NluError::ApiError(format!("status: {}, body: {}", status, body)));
        }

        let classification: Classification = response
            .json()
            .await
            .map_err(|e| NluError::ParseError(e.to_string()))?;

        tracing::debug!("Wit recognized entities: {:?}", classification.entity_names());

        Ok(classification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_classify_sends_token_and_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/message")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("v".into(), "20160526".into()),
                mockito::Matcher::UrlEncoded("q".into(), "what causes aids?".into()),
            ]))
            .match_header("authorization", "Bearer wit-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "msg_id": "0a1b",
                    "_text": "what causes aids?",
                    "entities": { "what_causes_aids": [{ "confidence": 0.93, "value": "true" }] }
                }"#,
            )
            .create_async()
            .await;

        let provider = WitProvider::new("wit-token").with_api_base(server.url());
        let classification = provider.classify("what causes aids?").await.unwrap();

        assert_eq!(classification.single_entity(), Some("what_causes_aids"));
        assert_eq!(classification.msg_id.as_deref(), Some("0a1b"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_classify_rate_limited() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let provider = WitProvider::new("wit-token").with_api_base(server.url());
        let err = provider.classify("hello").await.unwrap_err();
        assert!(matches!(err, NluError::RateLimited));
    }

    #[tokio::test]
    async fn test_classify_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error":"Bad auth, check token/params","code":"no-auth"}"#)
            .create_async()
            .await;

        let provider = WitProvider::new("bad").with_api_base(server.url());
        match provider.classify("hello").await {
            Err(NluError::ApiError(msg)) => assert!(msg.contains("no-auth")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_classify_unparseable_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let provider = WitProvider::new("wit-token").with_api_base(server.url());
        assert!(matches!(
            provider.classify("hello").await,
            Err(NluError::ParseError(_))
        ));
    }

    #[test]
    fn test_from_config_requires_token() {
        let mut config = crate::infrastructure::config::Config::default().nlu;
        assert!(matches!(WitProvider::from_config(&config), Err(NluError::MissingToken)));

        config.server_token = Some("tok".into());
        let provider = WitProvider::from_config(&config).unwrap();
        assert_eq!(provider.message_url(), "https://api.wit.ai/message");
    }
}
