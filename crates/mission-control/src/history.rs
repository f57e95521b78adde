// Bounded log of past winners, most recent first.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

/// Default number of winners kept in the log.
pub const DEFAULT_HISTORY_CAPACITY: usize = 8;

/// A single recorded winner.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub name: String,
    /// Local wall-clock time the winner was announced. Display only.
    pub decided_at: DateTime<Local>,
}

/// Winner log capped at a fixed capacity. The oldest entries fall off the
/// tail once the cap is exceeded.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryLog {
    /// A zero capacity is bumped to one so a completed run is always visible.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        HistoryLog {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Prepend a winner, evicting from the tail past capacity.
    pub fn record(&mut self, name: impl Into<String>) {
        self.entries.push_front(HistoryEntry {
            name: name.into(),
            decided_at: Local::now(),
        });
        self.entries.truncate(self.capacity);
    }

    /// Entries, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
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

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }
}

/// Ordinal label shown next to a history row.
///
/// The newest entry carries the highest number, so row `index` (0 = newest)
/// of a log with `len` entries is labelled `len - index`, zero padded.
pub fn ordinal_label(len: usize, index: usize) -> String {
    format!("{:02}", len.saturating_sub(index))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
