use std::collections::VecDeque;

use chrono::{Local, NaiveTime, Timelike};

use crate::models::LogEvent;

pub const DEFAULT_LOG_CAPACITY: usize = 300;

/// Append-only system log, oldest entries dropped past capacity.
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<LogEvent>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

impl EventLog {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.push_at(Local::now().time(), message);
    }

    pub fn push_at(&mut self, time: NaiveTime, message: impl Into<String>) {
        let time = time.with_nanosecond(0).unwrap_or(time);
        let event = LogEvent::new(time, message);
        tracing::info!(target: "volalert::log", "{}", event.message);

        self.entries.push_back(event);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Full history, oldest first.
    pub fn entries(&self) -> Vec<LogEvent> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
