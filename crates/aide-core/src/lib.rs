//! # Aide Core
//!
//! Core primitives and types for the Aide voice assistant.
//!
//! This crate provides the fundamental building blocks:
//! - [`Command`] - Structured form of a recognized utterance
//! - [`CommandParser`] - Keyword-based intent classification
//! - [`SessionConfig`] - Settings fixed at session start
//! - [`AssistantError`] - Recoverable error taxonomy

pub mod command;
pub mod config;
pub mod error;
pub mod parser;
pub mod types;

// Re-exports for convenience
pub use command::{Command, Intent, ReminderParseError};
pub use config::SessionConfig;
pub use error::{AssistantError, Result};
pub use parser::{parse, CommandParser};
pub use types::*;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::command::{Command, Intent, ReminderParseError};
    pub use crate::config::SessionConfig;
    pub use crate::error::{AssistantError, Result};
    pub use crate::parser::{parse, CommandParser};
    pub use crate::types::{Coordinates, Forecast, NewsItem, Notification, ReminderId};
}
