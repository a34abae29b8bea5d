//! Webhook HTTP server

pub mod middleware;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;

use crate::application::errors::BotError;
use crate::application::messaging::WebhookDispatcher;
use crate::application::services::ReplyService;
use crate::domain::traits::{Bot, SessionStore};
use crate::infrastructure::adapters::messenger::{self, MessengerAdapter, WebhookPayload};
use crate::infrastructure::config::Config;
use crate::infrastructure::nlu::{Classifier, WitProvider};
use crate::infrastructure::storage::InMemorySessionStore;

const INDEX_BODY: &str = "Hello world, I am a chat bot";
const WRONG_TOKEN_BODY: &str = "Error, wrong token";
const SIGNATURE_HEADER: &str = "x-hub-signature-256";

/// Shared state handed to every handler
pub struct AppState<B: Bot, C: Classifier, S: SessionStore> {
    dispatcher: Arc<WebhookDispatcher<B, C, S>>,
    verify_token: Arc<str>,
    app_secret: Option<Arc<str>>,
}

impl<B: Bot, C: Classifier, S: SessionStore> Clone for AppState<B, C, S> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
            verify_token: Arc::clone(&self.verify_token),
            app_secret: self.app_secret.clone(),
        }
    }
}

impl<B, C, S> AppState<B, C, S>
where
    B: Bot + 'static,
    C: Classifier + 'static,
    S: SessionStore + 'static,
{
    pub fn new(dispatcher: WebhookDispatcher<B, C, S>, verify_token: impl Into<String>) -> Self {
        let verify_token: String = verify_token.into();
        Self {
            dispatcher: Arc::new(dispatcher),
            verify_token: Arc::from(verify_token),
            app_secret: None,
        }
    }

    pub fn with_app_secret(mut self, app_secret: Option<String>) -> Self {
        self.app_secret = app_secret.filter(|s| !s.is_empty()).map(Arc::from);
        self
    }
}

/// Query string of the subscription handshake
#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    challenge: Option<String>,
}

/// Build the router for a given pipeline
pub fn router<B, C, S>(state: AppState<B, C, S>) -> Router
where
    B: Bot + 'static,
    C: Classifier + 'static,
    S: SessionStore + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/webhook", get(verify_webhook::<B, C, S>).post(receive_webhook::<B, C, S>))
        .route("/webhook/", get(verify_webhook::<B, C, S>).post(receive_webhook::<B, C, S>))
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .with_state(state)
}

/// Wire the production pipeline from configuration
pub fn build_app(config: &Config) -> Result<Router, BotError> {
    config.validate()?;

    let bot = MessengerAdapter::from_config(&config.messenger)?;
    let classifier = WitProvider::from_config(&config.nlu)
        .map_err(|e| BotError::Internal(e.to_string()))?;
    let service = ReplyService::new(bot, classifier, InMemorySessionStore::new());
    let dispatcher = WebhookDispatcher::new(Arc::new(service));

    let verify_token = config.messenger.verify_token.clone().unwrap_or_default();
    let state = AppState::new(dispatcher, verify_token)
        .with_app_secret(config.messenger.app_secret.clone());

    Ok(router(state))
}

/// Bind the listener and serve until the process is stopped
pub async fn serve(config: &Config) -> Result<(), BotError> {
    let app = build_app(config)?;
    let addr = config.listen_addr()?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| BotError::Network(format!("bind {} failed: {}", addr, e)))?;
    tracing::info!("{} listening on {}", config.bot.name, addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| BotError::Network(format!("serve failed: {}", e)))
}

async fn index() -> &'static str {
    INDEX_BODY
}

async fn healthz() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

async fn verify_webhook<B, C, S>(
    State(state): State<AppState<B, C, S>>,
    Query(params): Query<VerifyParams>,
) -> (StatusCode, String)
where
    B: Bot + 'static,
    C: Classifier + 'static,
    S: SessionStore + 'static,
{
    match messenger::verify_subscription(
        params.mode.as_deref(),
        params.verify_token.as_deref(),
        params.challenge.as_deref(),
        &state.verify_token,
    ) {
        Some(challenge) => {
            tracing::info!("Webhook subscription verified");
            (StatusCode::OK, challenge)
        }
        None => {
            tracing::warn!("Webhook verification failed (mode: {:?})", params.mode);
            (StatusCode::FORBIDDEN, WRONG_TOKEN_BODY.to_string())
        }
    }
}

async fn receive_webhook<B, C, S>(
    State(state): State<AppState<B, C, S>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str)
where
    B: Bot + 'static,
    C: Classifier + 'static,
    S: SessionStore + 'static,
{
    if let Some(secret) = &state.app_secret {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !messenger::verify_signature(&body, signature, secret) {
            tracing::warn!("Rejected webhook with bad signature");
            return (StatusCode::FORBIDDEN, "invalid signature");
        }
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!("Malformed webhook body: {}", e);
            return (StatusCode::BAD_REQUEST, "malformed payload");
        }
    };

    if payload.object != "page" {
        tracing::debug!("Webhook object is {:?}, dispatching anyway", payload.object);
    }

    // Replies go out on their own tasks; the platform only needs the ack
    state.dispatcher.dispatch(&payload);

    (StatusCode::OK, "EVENT_RECEIVED")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use hmac::{Hmac, Mac};
    use sha2::Sha256;
    use std::time::Duration;
    use tower::ServiceExt;
    use crate::application::services::reply_service::tests::{FixedClassifier, RecordingBot};

    type TestService = ReplyService<RecordingBot, FixedClassifier, InMemorySessionStore>;

    fn app(app_secret: Option<&str>) -> (Router, Arc<TestService>) {
        let service = Arc::new(ReplyService::new(
            RecordingBot::default(),
            FixedClassifier(Some(vec!["what_causes_aids"])),
            InMemorySessionStore::new(),
        ));
        let state = AppState::new(WebhookDispatcher::new(Arc::clone(&service)), "verify-me")
            .with_app_secret(app_secret.map(str::to_string));
        (router(state), service)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    const PAYLOAD: &str = r#"{"object":"page","entry":[{"messaging":[
        {"sender":{"id":"USER"},"recipient":{"id":"PAGE"},"message":{"mid":"m1","text":"what causes aids"}}
    ]}]}"#;

    #[tokio::test]
    async fn test_index() {
        let (app, _) = app(None);
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, INDEX_BODY);
    }

    #[tokio::test]
    async fn test_healthz() {
        let (app, _) = app(None);
        let response = app
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "ok");
    }

    #[tokio::test]
    async fn test_verify_echoes_challenge() {
        let (app, _) = app(None);
        let uri = "/webhook/?hub.mode=subscribe&hub.verify_token=verify-me&hub.challenge=1158201444";
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "1158201444");
    }

    #[tokio::test]
    async fn test_verify_rejects_wrong_token() {
        let (app, _) = app(None);
        let uri = "/webhook?hub.mode=subscribe&hub.verify_token=nope&hub.challenge=1";
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_string(response).await, WRONG_TOKEN_BODY);
    }

    #[tokio::test]
    async fn test_post_acks_and_replies() {
        let (app, service) = app(None);
        let request = Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("content-type", "application/json")
            .body(Body::from(PAYLOAD))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        for _ in 0..100 {
            if !service.bot().sent.lock().unwrap().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let sent = service.bot().sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient_id, "USER");
        assert_eq!(sent[0].text, "HIV causes AIDS");
    }

    #[tokio::test]
    async fn test_post_batch_with_senderless_optin() {
        let (app, service) = app(None);
        let payload = r#"{"object":"page","entry":[{"messaging":[
            {"sender":{"id":"USER"},"recipient":{"id":"PAGE"},"message":{"mid":"m1","text":"what causes aids"}},
            {"recipient":{"id":"PAGE"},"timestamp":1,"optin":{"ref":"promo","user_ref":"UREF"}}
        ]}]}"#;
        let request = Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("content-type", "application/json")
            .body(Body::from(payload))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        for _ in 0..100 {
            if !service.bot().sent.lock().unwrap().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        let sent = service.bot().sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient_id, "USER");
        assert_eq!(service.sessions().len().await, 1);
    }

    #[tokio::test]
    async fn test_post_malformed_body() {
        let (app, _) = app(None);
        let request = Request::builder()
            .method("POST")
            .uri("/webhook/")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_post_signature_checked_when_secret_set() {
        let mut mac = Hmac::<Sha256>::new_from_slice(b"app-secret").unwrap();
        mac.update(PAYLOAD.as_bytes());
        let signature = format!("sha256={}", hex::encode(mac.finalize().into_bytes()));

        let (app, _) = app(Some("app-secret"));
        let unsigned = Request::builder()
            .method("POST")
            .uri("/webhook")
            .body(Body::from(PAYLOAD))
            .unwrap();
        let response = app.clone().oneshot(unsigned).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let signed = Request::builder()
            .method("POST")
            .uri("/webhook")
            .header(SIGNATURE_HEADER, signature)
            .body(Body::from(PAYLOAD))
            .unwrap();
        let response = app.oneshot(signed).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_build_app_requires_secrets() {
        assert!(matches!(build_app(&Config::default()), Err(BotError::Config(_))));
    }
}
