use super::{CoreEvent, EventKind, Severity};
use crate::event;
use crate::util::LinkedBox;
use std::collections::HashMap;
use tokio::sync::broadcast;

/// Bounded history of [`CoreEvent`]s plus a live broadcast stream.
///
/// Slow subscribers may lag and miss events; the retained history is unaffected.
#[derive(Debug)]
pub struct EventLog {
    recent: LinkedBox<CoreEvent>,
    stream: broadcast::Sender<CoreEvent>,
}

impl EventLog {
    /// Number of events buffered per subscriber before it starts lagging.
    const STREAM_CAPACITY: usize = 256;

    pub fn new(capacity: usize) -> Self {
        let (stream, _) = broadcast::channel(Self::STREAM_CAPACITY);
        Self { recent: LinkedBox::new(capacity), stream }
    }

    /// Records and publishes an event, returning the stored copy.
    pub fn emit(&mut self, kind: EventKind) -> CoreEvent {
        let core_event = CoreEvent::new(kind);
        event!("[{}] {}", core_event.severity(), core_event.message());
        // No subscribers is not an error for the core.
        let _ = self.stream.send(core_event.clone());
        self.recent.push(core_event.clone());
        core_event
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CoreEvent> { self.stream.subscribe() }

    /// Retained events, oldest first.
    pub fn recent(&self) -> Vec<CoreEvent> { self.recent.iter().cloned().collect() }

    pub fn len(&self) -> usize { self.recent.len() }

    pub fn is_empty(&self) -> bool { self.recent.is_empty() }

    /// Per-severity counts over the retained events.
    pub fn severity_counts(&self) -> HashMap<Severity, usize> {
        let mut counts = HashMap::new();
        for core_event in self.recent.iter() {
            *counts.entry(core_event.severity()).or_insert(0) += 1;
        }
        counts
    }
}
