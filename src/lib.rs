//! helpline-bot - Messenger webhook relay answering HIV/AIDS questions
//!
//! Inbound messages are classified by Wit.ai and answered from a fixed
//! table of canned replies.

pub mod domain;
pub mod application;
pub mod infrastructure;
