//! Message handling - Webhook parsing and dispatching

pub mod dispatcher;
pub mod parser;

pub use dispatcher::WebhookDispatcher;
pub use parser::WebhookParser;
