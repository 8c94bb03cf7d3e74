//! Reminder store.

use std::fmt;

use aide_core::ReminderId;
use chrono::{DateTime, Duration, Local, Utc};
use serde::{Deserialize, Serialize};

/// A single scheduled notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Stable identifier within the session.
    pub id: ReminderId,

    /// What to remind about. Never empty.
    pub task: String,

    /// Wall-clock time at which the reminder becomes due.
    pub due_at: DateTime<Utc>,

    /// When the reminder was created.
    pub created_at: DateTime<Utc>,

    /// Set once, by [`ReminderStore::poll`]. Never reverts.
    pub delivered: bool,
}

impl Reminder {
    /// Returns true if the reminder should fire at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.delivered && self.due_at <= now
    }
}

impl fmt::Display for Reminder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.delivered {
            write!(f, "{} (✅ Done)", self.task)
        } else {
            let local = self.due_at.with_timezone(&Local);
            write!(f, "{} (⏳ at {})", self.task, local.format("%H:%M:%S"))
        }
    }
}

/// Ordered, append-only collection of reminders for one session.
///
/// Every method is synchronous, so `add` and `poll` are atomic with respect
/// to the await points of the session loop that owns the store.
#[derive(Debug, Default)]
pub struct ReminderStore {
    reminders: Vec<Reminder>,
}

impl ReminderStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to fire `minutes` from now.
    pub fn add(&mut self, task: impl Into<String>, minutes: u32) -> ReminderId {
        self.add_at(task, minutes, Utc::now())
    }

    /// Schedule `task` to fire `minutes` after `now`.
    pub fn add_at(&mut self, task: impl Into<String>, minutes: u32, now: DateTime<Utc>) -> ReminderId {
        let reminder = Reminder {
            id: ReminderId::new(),
            task: task.into(),
            due_at: now + Duration::minutes(i64::from(minutes)),
            created_at: now,
            delivered: false,
        };
        let id = reminder.id;

        tracing::debug!("Added reminder {} due at {}", id, reminder.due_at);
        self.reminders.push(reminder);

        id
    }

    /// Snapshot of all reminders in insertion order.
    pub fn list(&self) -> Vec<Reminder> {
        self.reminders.clone()
    }

    /// Get a reminder by ID.
    pub fn get(&self, id: ReminderId) -> Option<&Reminder> {
        self.reminders.iter().find(|r| r.id == id)
    }

    /// Mark every due reminder as delivered and return their IDs in store
    /// order. A reminder is returned by at most one call.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Vec<ReminderId> {
        let mut fired = Vec::new();

        for reminder in self.reminders.iter_mut().filter(|r| r.is_due(now)) {
            reminder.delivered = true;
            fired.push(reminder.id);
        }

        fired
    }

    /// Number of reminders created this session.
    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    /// Number of reminders still waiting to fire.
    pub fn pending_count(&self) -> usize {
        self.reminders.iter().filter(|r| !r.delivered).count()
    }

    /// Earliest due time among undelivered reminders.
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.reminders
            .iter()
            .filter(|r| !r.delivered)
            .map(|r| r.due_at)
            .min()
    }
}
