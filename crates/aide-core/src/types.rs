//! Common types used across the assistant.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a reminder within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReminderId(pub Uuid);

impl ReminderId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReminderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReminderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Ephemeral message produced when a reminder fires. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// The reminder that fired.
    pub reminder_id: ReminderId,

    /// Text to show and speak.
    pub text: String,
}

impl Notification {
    /// Build the notification for a fired reminder task.
    pub fn reminder(reminder_id: ReminderId, task: &str) -> Self {
        Self {
            reminder_id,
            text: format!("Reminder: It's time to {}!", task),
        }
    }
}

/// Geographic position returned by a geocoder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Current conditions returned by a weather service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Temperature in degrees Celsius.
    pub temperature: f64,
}

/// One entry of a news feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminder_notification_text() {
        let note = Notification::reminder(ReminderId::new(), "check email");
        assert_eq!(note.text, "Reminder: It's time to check email!");
    }

    #[test]
    fn test_reminder_ids_are_unique() {
        assert_ne!(ReminderId::new(), ReminderId::new());
    }
}
