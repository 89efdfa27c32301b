// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=virtual_scroll --heading-base-level=0

//! Virtual Scroll: windowed rendering for long, variable-height lists.
//!
//! This crate computes which items of a long list need to be mounted for a
//! given viewport, where each of them sits, and how tall the scrollable
//! content is. It is aimed at chat transcripts: items have stable keys,
//! heights are only known after they are rendered, and new items arrive at
//! the bottom.
//!
//! The core concepts are:
//!
//! - [`Keyed`]: items expose an `id`, falling back to a provisional `temp_id`.
//! - [`HeightCache`]: the last measured height per key, cleared wholesale
//!   when a list change leaves it with more than one and a half entries per
//!   item.
//! - [`ExtentModel`]: prefix-sum queries over per-item heights, implemented
//!   by [`LinearExtents`] (an O(n) scan) and [`PrefixSumExtents`] (a
//!   sum tree with O(log n) queries and updates).
//! - [`compute_visible_range`], [`compute_virtual_items`], and
//!   [`scroll_offset_for_index`]: the pure windowing rules.
//! - [`VirtualScroll`]: an engine that owns the items, the cache, and the
//!   scroll state, and recomputes the [`VisibleRange`] whenever one of its
//!   inputs changes.
//!
//! This crate does **not** render anything. Host frameworks are responsible
//! for:
//!
//! - Reporting scroll positions and container heights through
//!   [`VirtualScroll::on_scroll`] and [`VirtualScroll::on_container_resize`].
//! - Mounting [`VirtualScroll::virtual_items`] at their offsets inside a
//!   spacer of [`VirtualScroll::total_height`].
//! - Feeding measured heights back through
//!   [`VirtualScroll::record_measured_height`].
//! - Applying scroll commands issued through a [`ScrollHost`].
//!
//! ## Minimal example
//!
//! ```rust
//! use virtual_scroll::{Keyed, VirtualScroll, VirtualScrollConfig};
//!
//! struct Message {
//!     id: u64,
//! }
//!
//! impl Keyed for Message {
//!     type Key = u64;
//!     fn id(&self) -> Option<u64> {
//!         Some(self.id)
//!     }
//! }
//!
//! let messages = (0..1_000).map(|id| Message { id }).collect();
//! let mut list = VirtualScroll::with_items(VirtualScrollConfig::default(), messages).unwrap();
//! list.on_container_resize(400.0);
//! list.on_scroll(800.0);
//!
//! let range = list.visible_range();
//! assert_eq!((range.start, range.end), (10, 15));
//!
//! // Message 12 rendered taller than estimated.
//! list.record_measured_height(Some(12), 200.0).unwrap();
//!
//! for row in list.virtual_items() {
//!     // Mount `row.item` at `row.offset`, then measure it.
//!     assert!(row.height > 0.0);
//! }
//! ```
//!
//! All heights and offsets live in a caller-chosen 1D coordinate space
//! (typically logical pixels). Scroll positions and container heights that
//! are negative or not finite are treated as zero; measured heights that are
//! negative or not finite are rejected.
//!
//! With the `tracing` feature, range recomputation and cache clears are
//! reported through the `tracing` crate.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod engine;
mod error;
mod extent;
mod height_cache;
mod key;
mod prefix_sum;
mod scalar;
mod tail;
mod window;

pub use config::{DEFAULT_ITEM_HEIGHT, DEFAULT_OVERSCAN, VirtualScrollConfig};
pub use engine::{ScrollHost, VirtualScroll};
pub use error::{ConfigError, MeasureError};
pub use extent::{ExtentModel, LinearExtents};
pub use height_cache::HeightCache;
pub use key::Keyed;
pub use prefix_sum::PrefixSumExtents;
pub use scalar::Scalar;
pub use tail::{is_at_tail, tail_scroll_offset};
pub use window::{
    ScrollAlign, VirtualItem, VisibleRange, compute_virtual_items, compute_visible_range,
    scroll_offset_for_index,
};
