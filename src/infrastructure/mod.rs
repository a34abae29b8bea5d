//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Storage: Session table
//! - Adapters: Platform integrations (Messenger, console)
//! - NLU: Intent classification providers
//! - HTTP: Webhook server

pub mod config;
pub mod storage;
pub mod adapters;
pub mod nlu;
pub mod http;
