//! Testing utilities for solo crates

#![warn(missing_docs)]

mod event_log;
mod fixtures;
mod logging_delete;

pub use event_log::{Event, EventLog, Tracked};
pub use fixtures::{Circle, Shape, Square, Widget};
pub use logging_delete::LoggingDelete;
