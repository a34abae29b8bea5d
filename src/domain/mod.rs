//! Domain layer - Core business logic with no external dependencies
//! 
//! This layer contains:
//! - Entities: Core business objects (Message, Intent, Session)
//! - Traits: Abstractions for infrastructure (Bot, SessionStore)

pub mod entities;
pub mod traits;
