use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::kv::{self, KeyValueStore, StoreError};
use crate::store::schema::TYPING_HISTORY_KEY;

pub const HISTORY_CAPACITY: usize = 5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypingResult {
    pub wpm: u32,
    pub accuracy: u8,
    pub date: DateTime<Utc>,
}

/// Rolling FIFO of the most recent results, oldest first.
#[derive(Clone, Debug)]
pub struct TypingHistory {
    entries: Vec<TypingResult>,
    capacity: usize,
}

impl Default for TypingHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl TypingHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn load(store: &dyn KeyValueStore, capacity: usize) -> Self {
        let mut history = Self::with_capacity(capacity);
        history.entries = kv::load(store, TYPING_HISTORY_KEY);
        history.trim();
        history
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StoreError> {
        kv::save(store, TYPING_HISTORY_KEY, &self.entries)
    }

    pub fn record(&mut self, result: TypingResult) {
        self.entries.push(result);
        self.trim();
    }

    pub fn entries(&self) -> &[TypingResult] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&TypingResult> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn trim(&mut self) {
        if self.entries.len() > self.capacity {
            let excess = self.entries.len() - self.capacity;
            self.entries.drain(..excess);
        }
    }
}
