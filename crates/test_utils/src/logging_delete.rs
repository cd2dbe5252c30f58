use crate::{Event, EventLog};
use solo_memory::{Address, DefaultDelete, Deleter};
use std::ptr::NonNull;

/// A stateful deleter that records each invocation before releasing with [DefaultDelete]
#[derive(Clone, Debug)]
pub struct LoggingDelete {
    log: EventLog,
}

impl LoggingDelete {
    /// Makes a deleter that records into the given log
    pub fn new(log: &EventLog) -> Self {
        Self { log: log.clone() }
    }

    /// Returns the log that the deleter records into
    pub fn log(&self) -> &EventLog {
        &self.log
    }
}

impl<T: ?Sized> Deleter<T> for LoggingDelete {
    unsafe fn delete(&mut self, pointer: NonNull<T>) {
        self.log.record(Event::Deleted(Address::from(pointer)));
        unsafe { DefaultDelete.delete(pointer) }
    }
}
