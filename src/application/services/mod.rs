//! Application services - Business logic orchestration

pub mod reply_service;

pub use reply_service::ReplyService;
