use parking_lot::Mutex;
use solo_memory::Address;
use std::sync::Arc;

/// An event recorded in an [EventLog]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// A [Tracked] value with the given id was dropped
    Dropped(u32),
    /// A [LoggingDelete](crate::LoggingDelete) was invoked on the given address
    Deleted(Address),
}

/// Records drops and deletions in the order they happen
///
/// Clones of the log share the same event list, and the log can be shared between threads.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<Event>>>,
}

impl EventLog {
    /// Makes an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event to the log
    pub fn record(&self, event: Event) {
        self.events.lock().push(event);
    }

    /// Returns a copy of the recorded events
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Returns the ids of the dropped [Tracked] values, in drop order
    pub fn drops(&self) -> Vec<u32> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                Event::Dropped(id) => Some(*id),
                Event::Deleted(_) => None,
            })
            .collect()
    }

    /// Returns the addresses that deleters were invoked on, in order
    pub fn deletions(&self) -> Vec<Address> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                Event::Deleted(address) => Some(*address),
                Event::Dropped(_) => None,
            })
            .collect()
    }

    /// Returns true if no events have been recorded
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Clears the recorded events
    pub fn clear(&self) {
        self.events.lock().clear();
    }

    /// Makes a [Tracked] value that records its drop in this log
    pub fn tracked(&self, id: u32) -> Tracked {
        Tracked {
            id,
            log: self.clone(),
        }
    }
}

/// A value that records an [Event::Dropped] in its log when dropped
#[derive(Debug)]
pub struct Tracked {
    id: u32,
    log: EventLog,
}

impl Tracked {
    /// The id that will be recorded when the value is dropped
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.log.record(Event::Dropped(self.id));
    }
}
