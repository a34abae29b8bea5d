//! Platform adapters

pub mod console;
pub mod messenger;

pub use console::ConsoleAdapter;
pub use messenger::MessengerAdapter;
