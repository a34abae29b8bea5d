//! Domain entities - Core business objects with no external dependencies

pub mod message;
pub mod intent;
pub mod session;

pub use message::{Message, Content, OutboundMessage};
pub use intent::{Intent, FALLBACK_MESSAGE, message_for_entity};
pub use session::Session;
