//! NLU Providers

pub mod wit;

pub use wit::WitProvider;
