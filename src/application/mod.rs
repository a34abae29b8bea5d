//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: The receive, classify, lookup, send pipeline
//! - Errors: Domain-specific errors
//! - Messaging: Webhook parsing and dispatching

pub mod errors;
pub mod services;
pub mod messaging;
