// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measured item heights keyed by item key.

use core::hash::Hash;

use hashbrown::HashMap;

use crate::Scalar;

/// Last measured height per item key.
///
/// Entries are only inserted through explicit measurements and are never
/// evicted one by one. Instead, [`HeightCache::enforce_bound`] clears the
/// whole cache once it holds more than one and a half entries per item,
/// which bounds growth from items that have left the list.
#[derive(Clone, Debug)]
pub struct HeightCache<K, S> {
    heights: HashMap<K, S>,
}

impl<K, S> Default for HeightCache<K, S> {
    fn default() -> Self {
        Self {
            heights: HashMap::default(),
        }
    }
}

impl<K, S> HeightCache<K, S>
where
    K: Eq + Hash,
    S: Scalar,
{
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached measurements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Returns `true` if nothing has been measured since the last clear.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Returns the cached height for `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<S> {
        self.heights.get(key).copied()
    }

    /// Returns the cached height for `key`, or `default` when unknown.
    ///
    /// A `None` key always resolves to `default`.
    #[must_use]
    pub fn resolve(&self, key: Option<&K>, default: S) -> S {
        key.and_then(|key| self.get(key)).unwrap_or(default)
    }

    /// Inserts or replaces the measurement for `key`, returning the old one.
    pub fn insert(&mut self, key: K, height: S) -> Option<S> {
        self.heights.insert(key, height)
    }

    /// Drops every measurement.
    pub fn clear(&mut self) {
        self.heights.clear();
    }

    /// Returns `true` if the cache holds more than `1.5 * item_count` entries.
    #[must_use]
    pub fn exceeds_bound(&self, item_count: usize) -> bool {
        // len > 1.5 * n, kept in integers.
        self.heights.len().saturating_mul(2) > item_count.saturating_mul(3)
    }

    /// Clears the cache if it exceeds its bound. Returns `true` if it did.
    pub fn enforce_bound(&mut self, item_count: usize) -> bool {
        if self.exceeds_bound(item_count) {
            self.clear();
            true
        } else {
            false
        }
    }
}
