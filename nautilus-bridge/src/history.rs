//! Bounded log of recent events.

use crate::config::DEFAULT_HISTORY_CAPACITY;
use crate::event::BusEvent;
use std::collections::VecDeque;

/// Fixed-capacity, oldest-evicted event log.
#[derive(Debug)]
pub(crate) struct EventHistory {
    capacity: usize,
    events: VecDeque<BusEvent>,
}

impl EventHistory {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            events: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
        }
    }

    /// Appends an event, evicting the oldest one when full.
    pub(crate) fn push(&mut self, event: BusEvent) {
        if self.capacity == 0 {
            return;
        }
        while self.events.len() >= self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Up to `limit` events, most recent first.
    pub(crate) fn recent(&self, limit: Option<usize>) -> Vec<BusEvent> {
        self.events
            .iter()
            .rev()
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    pub(crate) fn clear(&mut self) {
        self.events.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }
}
