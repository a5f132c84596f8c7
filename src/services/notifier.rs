//! At-most-once notifications over a log that is re-delivered in full every poll.

use std::{
    collections::{HashSet, VecDeque},
    sync::Arc,
};

use chrono::NaiveTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::LogEvent;

pub const DEFAULT_SEEN_CAPACITY: usize = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationCategory {
    AlertTriggered,
    StatusChange,
    AlertCreated,
    UnusualVolume,
}

impl NotificationCategory {
    pub const ALL: [NotificationCategory; 4] = [
        NotificationCategory::AlertTriggered,
        NotificationCategory::StatusChange,
        NotificationCategory::AlertCreated,
        NotificationCategory::UnusualVolume,
    ];

    pub fn pattern(&self) -> &'static str {
        match self {
            NotificationCategory::AlertTriggered => r"^ALERT TRIGGERED\b",
            NotificationCategory::StatusChange => r"^STATUS CHANGE\b",
            NotificationCategory::AlertCreated => r"^ALERT CREATED\b",
            NotificationCategory::UnusualVolume => r"^UNUSUAL VOLUME\b",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().replace(' ', "_").as_str() {
            "ALERT_TRIGGERED" => Some(Self::AlertTriggered),
            "STATUS_CHANGE" => Some(Self::StatusChange),
            "ALERT_CREATED" => Some(Self::AlertCreated),
            "UNUSUAL_VOLUME" => Some(Self::UnusualVolume),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub category: NotificationCategory,
    #[serde(serialize_with = "hms")]
    pub time: NaiveTime,
    pub message: String,
}

fn hms<S: serde::Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&t.format("%H:%M:%S"))
}

/// `(time, message)` identities already handled. Oldest identities are
/// evicted first once the cap is reached.
#[derive(Debug, Clone)]
pub struct SeenEventSet {
    seen: HashSet<Arc<LogEvent>>,
    order: VecDeque<Arc<LogEvent>>,
    capacity: usize,
}

impl Default for SeenEventSet {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_SEEN_CAPACITY)
    }
}

impl SeenEventSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: HashSet::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn contains(&self, event: &LogEvent) -> bool {
        self.seen.contains(event)
    }

    /// Returns false if the identity was already present.
    pub fn insert(&mut self, event: &LogEvent) -> bool {
        if self.seen.contains(event) {
            return false;
        }

        let key = Arc::new(event.clone());
        self.seen.insert(Arc::clone(&key));
        self.order.push_back(key);
        while self.order.len() > self.capacity {
            if let Some(old) = self.order.pop_front() {
                self.seen.remove(&old);
            }
        }

        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.seen.clear();
        self.order.clear();
    }
}

/// Turns the full log sequence into new notifications for the configured categories.
#[derive(Debug, Clone)]
pub struct Deduplicator {
    seen: SeenEventSet,
    matchers: Vec<(NotificationCategory, Regex)>,
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new(&NotificationCategory::ALL, DEFAULT_SEEN_CAPACITY)
    }
}

impl Deduplicator {
    pub fn new(categories: &[NotificationCategory], seen_capacity: usize) -> Self {
        let matchers = categories
            .iter()
            .filter_map(|c| match Regex::new(c.pattern()) {
                Ok(re) => Some((*c, re)),
                Err(e) => {
                    tracing::error!("bad notification pattern for {c:?}: {e}");
                    None
                }
            })
            .collect();

        Self {
            seen: SeenEventSet::with_capacity(seen_capacity),
            matchers,
        }
    }

    pub fn categorize(&self, message: &str) -> Option<NotificationCategory> {
        self.matchers
            .iter()
            .find(|(_, re)| re.is_match(message))
            .map(|(c, _)| *c)
    }

    /// Every unseen entry is marked seen; matching ones yield one notification each.
    pub fn notify(&mut self, logs: &[LogEvent]) -> Vec<Notification> {
        let mut out = Vec::new();

        for event in logs {
            if !self.seen.insert(event) {
                continue;
            }

            if let Some(category) = self.categorize(&event.message) {
                out.push(Notification {
                    category,
                    time: event.time,
                    message: event.message.clone(),
                });
            }
        }

        out
    }

    pub fn seen(&self) -> &SeenEventSet {
        &self.seen
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }
}
