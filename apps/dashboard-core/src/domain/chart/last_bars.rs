//! Last-Bar Cache
//!
//! Remembers the most recent bar seen per symbol/resolution pair so a
//! freshly mounted chart can seed its series without refetching
//! history. Entries are overwritten as new bars arrive and never
//! evicted: the cache lives for the session of a single dashboard, so
//! no size bound or TTL is needed.
//!
//! Explicitly constructed and owned (not a process global); all access
//! happens on the UI event loop, so there is no interior locking.

use std::collections::HashMap;

use super::bar::{Bar, LastBarKey};

/// Most recent bar per symbol/resolution pair.
#[derive(Debug, Default)]
pub struct LastBarCache {
    bars: HashMap<LastBarKey, Bar>,
}

impl LastBarCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the latest bar for a key, replacing any previous bar.
    pub fn insert(&mut self, key: LastBarKey, bar: Bar) {
        self.bars.insert(key, bar);
    }

    /// The last bar seen for a key, or `None` if the key was never set.
    #[must_use]
    pub fn get(&self, key: &LastBarKey) -> Option<&Bar> {
        self.bars.get(key)
    }

    /// Number of cached keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
