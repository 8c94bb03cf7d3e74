//! Keyword-based command parser.
//!
//! Classification is ordered and first match wins: `weather`, then `news`,
//! then `remind`. Parsing is total; anything else is [`Command::Unrecognized`].

use crate::command::{Command, ReminderParseError};
use crate::config::{DEFAULT_BRIEFING_LIMIT, DEFAULT_CITY};

const WEATHER_KEYWORD: &str = "weather";
const WEATHER_CITY_MARKER: &str = "weather in";
const NEWS_KEYWORD: &str = "news";
const REMINDER_KEYWORD: &str = "remind";
const TASK_MARKER: &str = "to";

/// Turns lowercase utterances into commands.
#[derive(Debug, Clone)]
pub struct CommandParser {
    default_city: String,
    briefing_limit: usize,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new(DEFAULT_CITY, DEFAULT_BRIEFING_LIMIT)
    }
}

impl CommandParser {
    /// Create a parser with the given fallbacks.
    pub fn new(default_city: impl Into<String>, briefing_limit: usize) -> Self {
        Self {
            default_city: default_city.into(),
            briefing_limit,
        }
    }

    /// Parse an already-lowercased utterance.
    pub fn parse(&self, utterance: &str) -> Command {
        let query = utterance.trim();

        if query.contains(WEATHER_KEYWORD) {
            return Command::WeatherQuery {
                city: self.extract_city(query),
            };
        }

        if query.contains(NEWS_KEYWORD) {
            return Command::NewsBriefing {
                limit: self.briefing_limit,
            };
        }

        if query.contains(REMINDER_KEYWORD) {
            return match extract_reminder(query) {
                Ok((minutes, task)) => Command::ReminderRequest { minutes, task },
                Err(reason) => Command::ReminderParseFailed {
                    raw: utterance.to_string(),
                    reason,
                },
            };
        }

        Command::Unrecognized {
            raw: utterance.to_string(),
        }
    }

    fn extract_city(&self, query: &str) -> String {
        if !query.contains(WEATHER_CITY_MARKER) {
            return self.default_city.clone();
        }

        // An empty remainder stays empty and is left to the geocoder.
        query
            .rsplit(WEATHER_CITY_MARKER)
            .next()
            .unwrap_or_default()
            .trim()
            .to_string()
    }
}

/// Parse with the session defaults.
pub fn parse(utterance: &str) -> Command {
    CommandParser::default().parse(utterance)
}

/// Minutes are the leftmost all-digit token; the task is whatever follows
/// the last "to" (a plain substring split, so "tomatoes" leaves "es").
fn extract_reminder(query: &str) -> Result<(u32, String), ReminderParseError> {
    let token = query
        .split_whitespace()
        .find(|token| token.chars().all(|c| c.is_ascii_digit()))
        .ok_or(ReminderParseError::MissingMinutes)?;

    let minutes: u32 = token
        .parse()
        .map_err(|_| ReminderParseError::InvalidMinutes)?;
    if minutes == 0 {
        return Err(ReminderParseError::InvalidMinutes);
    }

    let task = query
        .rsplit(TASK_MARKER)
        .next()
        .unwrap_or_default()
        .trim();
    if task.is_empty() {
        return Err(ReminderParseError::EmptyTask);
    }

    Ok((minutes, task.to_string()))
}
