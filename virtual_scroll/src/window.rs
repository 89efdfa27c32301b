// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure windowing computations over an [`ExtentModel`].
//!
//! These functions hold no state: identical inputs always give identical
//! results. [`VirtualScroll`](crate::VirtualScroll) wires them to its own
//! scroll position, container height, and height model.

use alloc::vec::Vec;
use core::ops::Range;

use crate::{ExtentModel, Scalar};

/// Half-open interval of item indices that intersect the viewport, before
/// overscan is applied.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct VisibleRange {
    /// First visible index.
    pub start: usize,
    /// One past the last visible index.
    pub end: usize,
}

impl VisibleRange {
    /// The range that renders nothing.
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    /// Creates a range from its bounds.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns `true` if no item is visible.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Number of visible items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if `index` is visible.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    /// The range as `start..end`.
    #[must_use]
    pub const fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Pads the range by `overscan` on both sides, clamped to `0..len`.
    ///
    /// An empty range stays empty.
    #[must_use]
    pub fn expand(&self, overscan: usize, len: usize) -> Range<usize> {
        if self.is_empty() {
            return 0..0;
        }
        let start = self.start.saturating_sub(overscan);
        let end = self.end.saturating_add(overscan).min(len);
        start.min(end)..end
    }
}

/// Where an item should land in the viewport after a programmatic scroll.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollAlign {
    /// Item top aligned with the viewport top.
    #[default]
    Start,
    /// Item bottom aligned with the viewport bottom.
    End,
    /// Item centered in the viewport.
    Center,
}

/// A realized item: the caller's record plus its computed layout.
///
/// Virtual items are rebuilt on every query and borrow the item they
/// describe.
#[derive(Debug, PartialEq)]
pub struct VirtualItem<'a, T, S> {
    /// Position in the full list.
    pub index: usize,
    /// Distance from the top of the full list to the item's top edge.
    pub offset: S,
    /// Cached measurement, or the default estimate.
    pub height: S,
    /// The item itself.
    pub item: &'a T,
}

impl<T, S: Scalar> VirtualItem<'_, T, S> {
    /// Distance from the top of the full list to the item's bottom edge.
    #[must_use]
    pub fn bottom(&self) -> S {
        self.offset + self.height
    }
}

impl<T, S: Copy> Clone for VirtualItem<'_, T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S: Copy> Copy for VirtualItem<'_, T, S> {}

/// Computes which items intersect `[scroll_top, scroll_top + container_height)`.
///
/// `start` is the first item whose bottom edge lies below `scroll_top`.
/// `end` is one past the first item, from `start` on, whose bottom edge
/// reaches the viewport bottom, or `len` if the list ends first.
///
/// An empty model or a zero container height gives [`VisibleRange::EMPTY`].
/// When scrolled past the end of the content, the range holds only the last
/// item. Negative and non-finite inputs are treated as zero.
pub fn compute_visible_range<M: ExtentModel>(
    model: &M,
    scroll_top: M::Scalar,
    container_height: M::Scalar,
) -> VisibleRange {
    let len = model.len();
    let scroll_top = scroll_top.sanitize();
    let container_height = container_height.sanitize();
    if len == 0 || container_height <= M::Scalar::zero() {
        return VisibleRange::EMPTY;
    }

    let start = model.first_index_ending_after(scroll_top).min(len - 1);
    let bottom = scroll_top + container_height;
    let end = match model.first_index_reaching(bottom) {
        index if index < len => (index + 1).max(start + 1),
        _ => len,
    };
    VisibleRange { start, end }
}

/// Realizes the items of `range` padded by `overscan`.
///
/// Offsets are absolute within the full list. Items are returned in
/// ascending index order. `items` must be indexed like `model`; if it is
/// shorter, the window is cut at its end.
pub fn compute_virtual_items<'a, M, T>(
    model: &M,
    items: &'a [T],
    range: VisibleRange,
    overscan: usize,
) -> Vec<VirtualItem<'a, T, M::Scalar>>
where
    M: ExtentModel,
{
    let len = model.len().min(items.len());
    let window = range.expand(overscan, len);
    let mut offset = model.offset_of(window.start);
    let mut out = Vec::with_capacity(window.len());
    for index in window {
        let height = model.height_of(index);
        out.push(VirtualItem {
            index,
            offset,
            height,
            item: &items[index],
        });
        offset = offset + height;
    }
    out
}

/// Scroll offset that brings `index` into view with the given alignment.
///
/// Returns `None` if `index` is out of range. The result is clamped to be
/// non-negative but not to the maximum scroll offset; hosts clamp that
/// themselves when they apply it.
pub fn scroll_offset_for_index<M: ExtentModel>(
    model: &M,
    index: usize,
    align: ScrollAlign,
    container_height: M::Scalar,
) -> Option<M::Scalar> {
    if index >= model.len() {
        return None;
    }
    let offset = model.offset_of(index);
    let height = model.height_of(index);
    let container_height = container_height.sanitize();
    let target = match align {
        ScrollAlign::Start => offset,
        ScrollAlign::End => offset + height - container_height,
        ScrollAlign::Center => offset + height.half() - container_height.half(),
    };
    Some(target.clamp_non_negative())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PrefixSumExtents;

    fn uniform(n: usize) -> PrefixSumExtents<f64> {
        PrefixSumExtents::from_heights(core::iter::repeat_n(80.0, n))
    }

    #[test]
    fn range_at_top_of_uniform_list() {
        let model = uniform(100);
        assert_eq!(
            compute_visible_range(&model, 0.0, 400.0),
            VisibleRange::new(0, 5)
        );
    }

    #[test]
    fn partially_visible_items_are_included() {
        let model = uniform(100);
        // 10px into item 0, viewport bottom lands inside item 5.
        assert_eq!(
            compute_visible_range(&model, 10.0, 400.0),
            VisibleRange::new(0, 6)
        );
    }

    #[test]
    fn short_list_runs_to_the_end() {
        let model = uniform(3);
        assert_eq!(
            compute_visible_range(&model, 0.0, 400.0),
            VisibleRange::new(0, 3)
        );
    }

    #[test]
    fn empty_inputs_give_empty_range() {
        assert!(compute_visible_range(&uniform(0), 0.0, 400.0).is_empty());
        assert!(compute_visible_range(&uniform(10), 0.0, 0.0).is_empty());
        assert!(compute_visible_range(&uniform(10), 0.0, f64::NAN).is_empty());
    }

    #[test]
    fn overscrolled_range_keeps_last_item() {
        let model = uniform(10);
        assert_eq!(
            compute_visible_range(&model, 5_000.0, 400.0),
            VisibleRange::new(9, 10)
        );
    }

    #[test]
    fn expand_clamps_to_list_bounds() {
        assert_eq!(VisibleRange::new(0, 5).expand(3, 100), 0..8);
        assert_eq!(VisibleRange::new(10, 15).expand(3, 100), 7..18);
        assert_eq!(VisibleRange::new(95, 100).expand(3, 100), 92..100);
        assert_eq!(VisibleRange::EMPTY.expand(3, 100), 0..0);
    }

    #[test]
    fn virtual_items_carry_absolute_offsets() {
        let model = uniform(100);
        let items: Vec<usize> = (0..100).collect();
        let window = compute_virtual_items(&model, &items, VisibleRange::new(10, 15), 3);

        assert_eq!(window.len(), 11);
        assert_eq!(window[0].index, 7);
        assert_eq!(window[0].offset, 560.0);
        assert_eq!(*window[0].item, 7);
        for pair in window.windows(2) {
            assert_eq!(pair[0].bottom(), pair[1].offset);
        }
    }

    #[test]
    fn alignments_follow_viewport_geometry() {
        let model = uniform(100);
        let at = |align| scroll_offset_for_index(&model, 10, align, 400.0);

        assert_eq!(at(ScrollAlign::Start), Some(800.0));
        assert_eq!(at(ScrollAlign::End), Some(480.0));
        assert_eq!(at(ScrollAlign::Center), Some(640.0));
        // Clamped at the top.
        assert_eq!(
            scroll_offset_for_index(&model, 0, ScrollAlign::End, 400.0),
            Some(0.0)
        );
        assert_eq!(
            scroll_offset_for_index(&model, 100, ScrollAlign::Start, 400.0),
            None
        );
    }
}
