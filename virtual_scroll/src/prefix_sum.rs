// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sum-tree height model.
//!
//! [`PrefixSumExtents`] stores per-item heights as the leaves of an implicit
//! complete binary tree whose inner nodes hold the sum of their two children.
//! Offsets, point updates, and offset-to-index searches all cost O(log n).
//! Building from a full list of heights is O(n) and appending is amortized
//! O(log n).
//!
//! Every inner node is recomputed as `left + right` from the stored heights
//! whenever one of its leaves changes. Nothing is ever subtracted, so the
//! rounding error of an offset depends only on the current heights and not
//! on how many measurements came before.

use alloc::vec::Vec;

use crate::{ExtentModel, Scalar};

/// Height model backed by a sum tree.
///
/// ```
/// use virtual_scroll::{ExtentModel, PrefixSumExtents};
///
/// let mut model = PrefixSumExtents::from_heights([80.0_f64; 10]);
/// model.set_height(2, 200.0);
///
/// assert_eq!(model.offset_of(3), 360.0);
/// assert_eq!(model.total_height(), 920.0);
/// assert_eq!(model.first_index_ending_after(360.0), 3);
/// ```
#[derive(Clone, Debug)]
pub struct PrefixSumExtents<S> {
    heights: Vec<S>,
    // Node `i` has children `2i` and `2i + 1`; leaf `k` lives at
    // `capacity + k`. Node 0 is unused and leaves past `heights.len()` are zero.
    sums: Vec<S>,
    // Power of two, at least 1.
    capacity: usize,
}

impl<S: Scalar> Default for PrefixSumExtents<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scalar> PrefixSumExtents<S> {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            sums: alloc::vec![S::zero(); 2],
            capacity: 1,
        }
    }

    /// Builds a model from heights in index order, in O(n).
    #[must_use]
    pub fn from_heights(heights: impl IntoIterator<Item = S>) -> Self {
        let mut model = Self::new();
        model.rebuild(heights);
        model
    }

    /// Replaces all heights, in O(n).
    pub fn rebuild(&mut self, heights: impl IntoIterator<Item = S>) {
        self.heights.clear();
        self.heights.extend(heights);
        self.rebuild_nodes();
    }

    /// Appends one item with the given height.
    pub fn push(&mut self, height: S) {
        let index = self.heights.len();
        self.heights.push(height);
        if index < self.capacity {
            self.update_path(index);
        } else {
            self.rebuild_nodes();
        }
    }

    /// Sets the height of `index`, in O(log n).
    ///
    /// Out-of-range indices are ignored.
    pub fn set_height(&mut self, index: usize, height: S) {
        let Some(slot) = self.heights.get_mut(index) else {
            return;
        };
        *slot = height;
        self.update_path(index);
    }

    fn rebuild_nodes(&mut self) {
        self.capacity = self.heights.len().next_power_of_two();
        self.sums.clear();
        self.sums.resize(2 * self.capacity, S::zero());
        self.sums[self.capacity..self.capacity + self.heights.len()]
            .copy_from_slice(&self.heights);
        for node in (1..self.capacity).rev() {
            self.sums[node] = self.sums[2 * node] + self.sums[2 * node + 1];
        }
    }

    /// Copies leaf `index` from `heights` and recomputes its ancestors.
    fn update_path(&mut self, index: usize) {
        let mut node = self.capacity + index;
        self.sums[node] = self.heights[index];
        node /= 2;
        while node >= 1 {
            self.sums[node] = self.sums[2 * node] + self.sums[2 * node + 1];
            node /= 2;
        }
    }

    /// Sum of the first `count` heights.
    fn prefix(&self, count: usize) -> S {
        let mut remaining = count.min(self.heights.len());
        let mut acc = S::zero();
        let mut node = 1;
        let mut span = self.capacity;
        while remaining > 0 {
            if remaining >= span {
                acc = acc + self.sums[node];
                break;
            }
            span /= 2;
            let left = 2 * node;
            if remaining >= span {
                acc = acc + self.sums[left];
                remaining -= span;
                node = left + 1;
            } else {
                node = left;
            }
        }
        acc
    }

    /// Largest `count` such that `keep(prefix(count))` holds.
    ///
    /// `keep` must be monotone over prefix sums (true, then false), which is
    /// the case for threshold comparisons when all heights are non-negative.
    fn search(&self, keep: impl Fn(S) -> bool) -> usize {
        let len = self.heights.len();
        if len == 0 {
            return 0;
        }
        let mut node = 1;
        let mut span = self.capacity;
        let mut count = 0;
        let mut acc = S::zero();
        while span > 1 {
            span /= 2;
            let left = 2 * node;
            let candidate = acc + self.sums[left];
            if keep(candidate) {
                acc = candidate;
                count += span;
                node = left + 1;
            } else {
                node = left;
            }
        }
        if keep(acc + self.sums[node]) {
            count += 1;
        }
        // Zero-height padding leaves past the end can be taken too.
        count.min(len)
    }
}

impl<S: Scalar> ExtentModel for PrefixSumExtents<S> {
    type Scalar = S;

    fn len(&self) -> usize {
        self.heights.len()
    }

    fn height_of(&self, index: usize) -> S {
        self.heights.get(index).copied().unwrap_or_else(S::zero)
    }

    fn offset_of(&self, index: usize) -> S {
        self.prefix(index)
    }

    fn first_index_ending_after(&self, offset: S) -> usize {
        // The items before the returned index all end at or above `offset`.
        self.search(|sum| sum <= offset)
    }

    fn first_index_reaching(&self, offset: S) -> usize {
        self.search(|sum| sum < offset)
    }
}
