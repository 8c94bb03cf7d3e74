//! Command types produced by the parser.
//!
//! A Command is the structured form of one recognized utterance.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Structured form of a recognized utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Current temperature lookup for a city.
    WeatherQuery { city: String },

    /// Spoken summary of the top feed headlines.
    NewsBriefing { limit: usize },

    /// Schedule a reminder `minutes` from now.
    ReminderRequest { minutes: u32, task: String },

    /// The utterance asked for a reminder but lacked a usable time or task.
    ReminderParseFailed {
        raw: String,
        reason: ReminderParseError,
    },

    /// No known keyword matched.
    Unrecognized { raw: String },
}

/// Why a reminder utterance could not be turned into a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderParseError {
    /// No whitespace-separated token made only of digits.
    MissingMinutes,
    /// The digit token does not fit, or is zero.
    InvalidMinutes,
    /// Nothing left after the last "to".
    EmptyTask,
}

impl fmt::Display for ReminderParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReminderParseError::MissingMinutes => write!(f, "no number of minutes found"),
            ReminderParseError::InvalidMinutes => write!(f, "number of minutes out of range"),
            ReminderParseError::EmptyTask => write!(f, "no task found"),
        }
    }
}

/// The classified purpose of an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Weather,
    News,
    Reminder,
    Unrecognized,
}

impl Command {
    /// The intent this command was classified as.
    pub fn intent(&self) -> Intent {
        match self {
            Command::WeatherQuery { .. } => Intent::Weather,
            Command::NewsBriefing { .. } => Intent::News,
            Command::ReminderRequest { .. } | Command::ReminderParseFailed { .. } => {
                Intent::Reminder
            }
            Command::Unrecognized { .. } => Intent::Unrecognized,
        }
    }

    /// Returns true if executing this command changes session state.
    pub fn is_mutating(&self) -> bool {
        matches!(self, Command::ReminderRequest { .. })
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Intent::Weather => "weather",
            Intent::News => "news",
            Intent::Reminder => "reminder",
            Intent::Unrecognized => "unrecognized",
        };
        f.write_str(name)
    }
}
