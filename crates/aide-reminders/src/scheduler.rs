//! Liveness scheduler for reminders.

use std::time::Duration;

use aide_core::config::DEFAULT_TICK_INTERVAL_SECS;
use aide_core::Notification;
use chrono::{DateTime, Utc};
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::info;

use crate::store::ReminderStore;

/// Periodic check that turns due reminders into notifications.
///
/// [`Scheduler::tick`] only mutates the store; rendering the returned
/// notifications is the caller's job. Delivery is exactly-once because
/// `poll` flips each reminder's flag before anything is rendered.
#[derive(Debug, Clone)]
pub struct Scheduler {
    interval: Duration,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TICK_INTERVAL_SECS))
    }
}

impl Scheduler {
    /// Create a scheduler with the given cadence.
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// The tick cadence.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// A timer for the session loop. A tick delayed by a slow external call
    /// is not followed by a burst of catch-up ticks.
    pub fn ticker(&self) -> Interval {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    }

    /// Run one check at `now`.
    pub fn tick(&self, store: &mut ReminderStore, now: DateTime<Utc>) -> Vec<Notification> {
        let notifications: Vec<Notification> = store
            .poll(now)
            .into_iter()
            .filter_map(|id| store.get(id))
            .map(|reminder| Notification::reminder(reminder.id, &reminder.task))
            .collect();

        for notification in &notifications {
            info!("🔔 Reminder {} fired", notification.reminder_id);
        }

        notifications
    }
}
