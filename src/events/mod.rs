//! Structured events emitted by the core for logging and display collaborators.
//!
//! Severity is attached where an event is raised and travels with it, so a
//! display layer never has to infer it from the rendered message.

mod core_event;
mod event_log;

pub use core_event::{CoreEvent, EventKind, Severity};
pub use event_log::EventLog;
