//! In-memory session storage

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::Session;
use crate::domain::traits::SessionStore;

/// Sessions by id, plus the sender index; both change under one lock
#[derive(Default)]
struct Tables {
    sessions: HashMap<String, Session>,
    by_recipient: HashMap<String, String>,
}

/// Session table kept in process memory; lost on restart
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn find_or_create(&self, recipient_id: &str) -> Session {
        let mut tables = self.tables.write().await;
        let Tables { sessions, by_recipient } = &mut *tables;

        if let Some(session) = by_recipient.get(recipient_id).and_then(|id| sessions.get_mut(id)) {
            session.touch();
            return session.clone();
        }

        let session = Session::new(recipient_id);
        tracing::debug!("Created session {} for {}", session.id, recipient_id);
        by_recipient.insert(recipient_id.to_string(), session.id.clone());
        sessions.insert(session.id.clone(), session.clone());
        session
    }

    async fn recipient_for(&self, session_id: &str) -> Option<String> {
        let tables = self.tables.read().await;
        tables.sessions.get(session_id).map(|s| s.recipient_id.clone())
    }

    async fn remove(&self, session_id: &str) -> Option<Session> {
        let mut tables = self.tables.write().await;
        let session = tables.sessions.remove(session_id)?;
        tables.by_recipient.remove(&session.recipient_id);
        Some(session)
    }

    async fn len(&self) -> usize {
        self.tables.read().await.sessions.len()
    }
}
