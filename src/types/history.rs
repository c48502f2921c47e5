//! Bounded round history
//!
//! Holds the most recent resolved buckets, oldest first. Only `Special`
//! and `Classic` are ever stored; when full, the oldest entry is evicted.

use std::collections::VecDeque;
use serde::{Deserialize, Serialize};

use crate::types::Bucket;
use crate::HISTORY_CAPACITY;

/// Rolling window of resolved round buckets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Bucket>", into = "Vec<Bucket>")]
pub struct History {
    entries: VecDeque<Bucket>,
}

impl History {
    /// Create an empty history
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
        }
    }

    /// Build a history from buckets in order, applying the same eviction as `push`
    pub fn from_buckets(buckets: &[Bucket]) -> Self {
        let mut history = Self::new();
        for bucket in buckets {
            history.push(*bucket);
        }
        history
    }

    /// Append a resolved bucket and evict the oldest beyond capacity
    ///
    /// Unresolved and exempt buckets are ignored.
    pub fn push(&mut self, bucket: Bucket) {
        if !bucket.is_resolved() {
            return;
        }
        self.entries.push_back(bucket);
        while self.entries.len() > HISTORY_CAPACITY {
            self.entries.pop_front();
        }
    }

    /// Remove the most recent entry
    pub fn pop_last(&mut self) -> Option<Bucket> {
        self.entries.pop_back()
    }

    /// Most recent entry
    pub fn last(&self) -> Option<Bucket> {
        self.entries.back().copied()
    }

    /// The two most recent entries as (second-to-last, last)
    pub fn last_two(&self) -> Option<(Bucket, Bucket)> {
        let len = self.entries.len();
        if len < 2 {
            return None;
        }
        Some((self.entries[len - 2], self.entries[len - 1]))
    }

    /// Count `Special` among the last `n` entries (fewer if shorter)
    pub fn special_count_in_last(&self, n: usize) -> usize {
        self.entries
            .iter()
            .rev()
            .take(n)
            .filter(|b| **b == Bucket::Special)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<Bucket> {
        self.entries.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl From<Vec<Bucket>> for History {
    fn from(buckets: Vec<Bucket>) -> Self {
        Self::from_buckets(&buckets)
    }
}

impl From<History> for Vec<Bucket> {
    fn from(history: History) -> Self {
        history.entries.into()
    }
}

// =============================================================================
// TESTS
// =============================================================================
