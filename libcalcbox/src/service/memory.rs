//! Memory register service
//!
//! Holds the memory slots newest-first together with the recall cursor used
//! to cycle through them on repeated recall.

use crate::types::{MemoryItem, ModifyOp};
use tracing::debug;

/// Memory register store
///
/// One instance per calculator session. The newest slot is always at
/// index 0; store/add/subtract only touch that slot, while
/// [`modify_item`](Self::modify_item) can target any slot by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryService {
    items: Vec<MemoryItem>,
    recall_index: usize,
}

impl MemoryService {
    /// Create an empty memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all slots, newest first
    pub fn get_all(&self) -> Vec<MemoryItem> {
        self.items.clone()
    }

    /// Look up a slot by id
    pub fn get(&self, id: &str) -> Option<&MemoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn has_value(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current recall cursor
    pub fn recall_index(&self) -> usize {
        self.recall_index
    }

    /// Store a new slot (MS)
    ///
    /// Skipped when the newest slot already holds `value`; only the head is
    /// checked for duplicates.
    pub fn store(&mut self, value: f64) {
        if self.items.first().is_some_and(|item| item.value == value) {
            debug!(value, "memory store skipped, newest slot already holds value");
            return;
        }

        let item = MemoryItem::new(value);
        debug!(id = %item.id, value, "memory slot stored");
        self.items.insert(0, item);
        self.recall_index = 0;
    }

    /// Add to the newest slot (M+), storing a new slot if memory is empty
    pub fn add(&mut self, value: f64) {
        self.apply_to_newest(value, ModifyOp::Add);
    }

    /// Subtract from the newest slot (M-), storing `-value` if memory is empty
    pub fn subtract(&mut self, value: f64) {
        self.apply_to_newest(value, ModifyOp::Subtract);
    }

    fn apply_to_newest(&mut self, value: f64, op: ModifyOp) {
        match self.items.first_mut() {
            Some(newest) => {
                newest.modify(value, op);
                debug!(id = %newest.id, value = newest.value, %op, "newest memory slot modified");
            }
            None => match op {
                ModifyOp::Add => self.store(value),
                ModifyOp::Subtract => self.store(-value),
            },
        }
    }

    /// Recall the slot under the cursor (MR) and advance the cursor
    ///
    /// Successive calls cycle newest to oldest and wrap around. Returns 0
    /// when memory is empty.
    pub fn recall(&mut self) -> f64 {
        if self.items.is_empty() {
            self.recall_index = 0;
            return 0.0;
        }

        // The list may have shrunk since the cursor last moved
        let index = self.recall_index % self.items.len();
        let value = self.items[index].value;
        self.recall_index = (index + 1) % self.items.len();
        value
    }

    /// Restart recall cycling from the newest slot
    pub fn reset_recall_index(&mut self) {
        self.recall_index = 0;
    }

    /// Remove a slot by id
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|item| item.id != id);
        self.recall_index = 0;
        debug!(id, remaining = self.items.len(), "memory slot removed");
    }

    /// Add to or subtract from a specific slot; unknown ids are ignored
    pub fn modify_item(&mut self, id: &str, value: f64, op: ModifyOp) {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.modify(value, op);
                debug!(id, value = item.value, %op, "memory slot modified");
            }
            None => debug!(id, "memory modify ignored, no such slot"),
        }
    }

    /// Clear all slots (MC)
    pub fn clear(&mut self) {
        self.items.clear();
        self.recall_index = 0;
    }
}
