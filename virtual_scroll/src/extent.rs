// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Height models over an indexed strip of items.

use core::hash::Hash;

use crate::{HeightCache, Scalar};

/// A strip of items `0..len` with per-item heights and prefix-sum queries.
///
/// All heights are expected to be finite and non-negative. Offsets are
/// absolute: `offset_of(i)` is the sum of the heights of items `0..i`.
pub trait ExtentModel {
    /// Scalar type for heights and offsets.
    type Scalar: Scalar;

    /// Number of items in the strip.
    fn len(&self) -> usize;

    /// Returns `true` if the strip has no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Height of the item at `index`.
    ///
    /// Out-of-range indices report a height of zero.
    fn height_of(&self, index: usize) -> Self::Scalar;

    /// Distance from the top of the strip to the top edge of `index`.
    ///
    /// `index` may equal `len`, in which case this is the total height.
    /// Larger indices are clamped to `len`.
    fn offset_of(&self, index: usize) -> Self::Scalar;

    /// Sum of all item heights.
    fn total_height(&self) -> Self::Scalar {
        self.offset_of(self.len())
    }

    /// Index of the first item whose bottom edge lies strictly below `offset`.
    ///
    /// Returns `len` if no item extends past `offset`.
    fn first_index_ending_after(&self, offset: Self::Scalar) -> usize;

    /// Index of the first item whose bottom edge is at or below `offset`.
    ///
    /// Returns `len` if the strip ends above `offset`.
    fn first_index_reaching(&self, offset: Self::Scalar) -> usize;
}

/// Linear-scan model over item keys and an explicitly passed [`HeightCache`].
///
/// Every query walks the strip from the top, so each costs O(n). This is the
/// direct form of the windowing rules and is useful as a reference for
/// [`PrefixSumExtents`](crate::PrefixSumExtents), or for short lists where
/// maintaining a tree is not worth it.
#[derive(Debug)]
pub struct LinearExtents<'a, K, S> {
    keys: &'a [Option<K>],
    cache: &'a HeightCache<K, S>,
    default_height: S,
}

impl<'a, K, S> LinearExtents<'a, K, S>
where
    K: Eq + Hash,
    S: Scalar,
{
    /// Creates a model that resolves heights for `keys` through `cache`.
    #[must_use]
    pub fn new(keys: &'a [Option<K>], cache: &'a HeightCache<K, S>, default_height: S) -> Self {
        Self {
            keys,
            cache,
            default_height,
        }
    }

    fn heights(&self) -> impl Iterator<Item = S> + '_ {
        self.keys
            .iter()
            .map(|key| self.cache.resolve(key.as_ref(), self.default_height))
    }
}

impl<K, S> ExtentModel for LinearExtents<'_, K, S>
where
    K: Eq + Hash,
    S: Scalar,
{
    type Scalar = S;

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn height_of(&self, index: usize) -> S {
        match self.keys.get(index) {
            Some(key) => self.cache.resolve(key.as_ref(), self.default_height),
            None => S::zero(),
        }
    }

    fn offset_of(&self, index: usize) -> S {
        self.heights()
            .take(index)
            .fold(S::zero(), |acc, height| acc + height)
    }

    fn first_index_ending_after(&self, offset: S) -> usize {
        let mut acc = S::zero();
        for (index, height) in self.heights().enumerate() {
            acc = acc + height;
            if acc > offset {
                return index;
            }
        }
        self.len()
    }

    fn first_index_reaching(&self, offset: S) -> usize {
        let mut acc = S::zero();
        for (index, height) in self.heights().enumerate() {
            acc = acc + height;
            if acc >= offset {
                return index;
            }
        }
        self.len()
    }
}
