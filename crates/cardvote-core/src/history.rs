//! Bounded, newest-first action history.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::content::VoteDirection;

pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

/// One successful vote as remembered by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Source id of the voted item.
    pub item_id: String,
    pub name: String,
    pub direction: VoteDirection,
    pub timestamp: DateTime<Utc>,
}

/// Client-local vote history. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for ActionHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl ActionHistory {
    /// A zero capacity is raised to one so a recorded vote is always visible.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Prepends an entry, evicting the oldest once the cap is exceeded.
    pub fn record(
        &mut self,
        item_id: impl Into<String>,
        name: impl Into<String>,
        direction: VoteDirection,
    ) {
        self.entries.push_front(HistoryEntry {
            item_id: item_id.into(),
            name: name.into(),
            direction,
            timestamp: Utc::now(),
        });
        self.entries.truncate(self.capacity);
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

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }
}
