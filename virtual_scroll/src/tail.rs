// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bottom anchoring for chat transcripts.
//!
//! Chat views usually stay pinned to the newest message while the user is
//! reading the bottom of the transcript, and stop following once they scroll
//! up. The pattern is:
//!
//! 1. Before mutating the list, ask whether the view is at the bottom.
//! 2. Append messages or record measurements.
//! 3. If it was at the bottom, scroll back to the bottom.
//!
//! ```rust
//! use virtual_scroll::{Keyed, VirtualScroll, VirtualScrollConfig};
//!
//! struct Row(u32);
//!
//! impl Keyed for Row {
//!     type Key = u32;
//!     fn id(&self) -> Option<u32> {
//!         Some(self.0)
//!     }
//! }
//!
//! let config = VirtualScrollConfig::default().with_item_height(10.0);
//! let mut list = VirtualScroll::with_items(config, (0..3).map(Row).collect()).unwrap();
//! list.on_container_resize(20.0);
//!
//! // Pin to the bottom; the host reports the scroll back.
//! let top = list.scroll_to_bottom(&mut |_: f64| {});
//! list.on_scroll(top);
//! assert!(list.is_at_bottom(1.0));
//!
//! let was_at_bottom = list.is_at_bottom(1.0);
//! list.push_item(Row(3));
//! assert!(!list.is_at_bottom(1.0));
//!
//! if was_at_bottom {
//!     let top = list.scroll_to_bottom(&mut |_: f64| {});
//!     list.on_scroll(top);
//! }
//! assert!(list.is_at_bottom(1.0));
//! ```

use crate::{ExtentModel, Keyed, Scalar, ScrollHost, VirtualScroll};

/// Scroll offset that aligns the end of the content with the viewport bottom.
///
/// The result is clamped to `>= 0` and is `0` when the content fits inside
/// the viewport.
pub fn tail_scroll_offset<M: ExtentModel>(model: &M, viewport_height: M::Scalar) -> M::Scalar {
    let total = model.total_height().clamp_non_negative();
    let viewport = viewport_height.sanitize();
    if total <= viewport {
        M::Scalar::zero()
    } else {
        total - viewport
    }
}

/// Returns `true` if `scroll_top` is within `epsilon` above the tail offset.
///
/// The check is one-sided: anything at or past the tail offset counts as
/// anchored, which covers elastic overscroll.
pub fn is_at_tail<M: ExtentModel>(
    model: &M,
    scroll_top: M::Scalar,
    viewport_height: M::Scalar,
    epsilon: M::Scalar,
) -> bool {
    let tail = tail_scroll_offset(model, viewport_height);
    scroll_top.sanitize() + epsilon.sanitize() >= tail
}

impl<T: Keyed, S: Scalar> VirtualScroll<T, S> {
    /// Scroll offset that shows the last item at the viewport bottom.
    #[must_use]
    pub fn tail_scroll_offset(&self) -> S {
        tail_scroll_offset(self.extents(), self.container_height())
    }

    /// Returns `true` if the last reported scroll position is within
    /// `epsilon` of the bottom.
    #[must_use]
    pub fn is_at_bottom(&self, epsilon: S) -> bool {
        is_at_tail(
            self.extents(),
            self.scroll_top(),
            self.container_height(),
            epsilon,
        )
    }

    /// Asks `host` to scroll to the bottom and returns the requested offset.
    pub fn scroll_to_bottom(&self, host: &mut impl ScrollHost<S>) -> S {
        let offset = self.tail_scroll_offset();
        host.set_scroll_top(offset);
        offset
    }
}
