//! # Aide Assistant
//!
//! Session engine for the Aide voice assistant: turns commands and fired
//! reminders into rendered, spoken responses, and drives the reminder
//! liveness loop alongside user input.

pub mod coordinator;
pub mod output;
pub mod session;

pub use coordinator::{Collaborators, Input, RenderedResponse, ResponseCoordinator, ResponseKind};
pub use output::{ConsoleSink, ResponseSink};
pub use session::{Session, SessionSummary};
