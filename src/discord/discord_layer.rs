// Discord layer - commands and event handlers.

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "quotes/quote_handler.rs"]
pub mod quotes;

// Re-export command types for convenience
pub use commands::help::{Context, Data, Error};
