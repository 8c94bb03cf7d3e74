//! # Aide Reminders
//!
//! Session-scoped reminder store with an exactly-once delivery scheduler.

pub mod scheduler;
pub mod store;

pub use scheduler::Scheduler;
pub use store::{Reminder, ReminderStore};
