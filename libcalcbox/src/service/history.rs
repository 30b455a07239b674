//! History service for completed calculations
//!
//! Keeps a bounded, newest-first log of `(expression, result)` records for
//! the lifetime of the session.

use crate::types::HistoryItem;
use std::collections::VecDeque;
use tracing::trace;

/// Default number of records kept before the oldest is evicted
pub const HISTORY_CAPACITY: usize = 100;

/// History log
///
/// Records are never de-duplicated: every committed calculation, including
/// intermediate results of chained operators, gets its own record.
#[derive(Debug, Clone)]
pub struct HistoryService {
    items: VecDeque<HistoryItem>,
    capacity: usize,
}

impl Default for HistoryService {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryService {
    /// Create a history log with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// Create a history log holding at most `capacity` records
    ///
    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Record a calculation, evicting the oldest record when full
    pub fn add(&mut self, expression: impl Into<String>, result: impl Into<String>) -> &HistoryItem {
        self.items
            .push_front(HistoryItem::new(expression.into(), result.into()));

        if self.items.len() > self.capacity {
            if let Some(evicted) = self.items.pop_back() {
                trace!(id = %evicted.id, "oldest history record evicted");
            }
        }

        &self.items[0]
    }

    /// Snapshot of all records, newest first
    pub fn get_all(&self) -> Vec<HistoryItem> {
        self.items.iter().cloned().collect()
    }

    /// Look up a record by id
    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
