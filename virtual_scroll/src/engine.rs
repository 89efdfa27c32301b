// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stateful windowing engine.

use alloc::vec::Vec;
use core::ops::Range;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::{
    ConfigError, ExtentModel, HeightCache, Keyed, LinearExtents, MeasureError, PrefixSumExtents,
    Scalar, ScrollAlign, VirtualItem, VirtualScrollConfig, VisibleRange, compute_virtual_items,
    compute_visible_range, scroll_offset_for_index,
};

/// The scroll container a [`VirtualScroll`] issues scroll commands to.
///
/// The engine never moves its own scroll position in response to a command;
/// the host reports the resulting position through
/// [`VirtualScroll::on_scroll`] like any other scroll.
///
/// Closures taking the new offset implement this trait.
pub trait ScrollHost<S> {
    /// Moves the container so that `offset` is at the viewport top.
    fn set_scroll_top(&mut self, offset: S);
}

impl<S, F: FnMut(S)> ScrollHost<S> for F {
    fn set_scroll_top(&mut self, offset: S) {
        self(offset);
    }
}

type KeyIndex<K> = HashMap<K, SmallVec<[usize; 1]>>;

/// Windowing engine for a list of variable-height items.
///
/// `VirtualScroll` owns the items, the [`HeightCache`], the current scroll
/// position and container height, and the [`VisibleRange`] derived from
/// them. Each mutating call recomputes the visible range before returning,
/// so [`VirtualScroll::visible_range`] and [`VirtualScroll::virtual_items`]
/// always reflect the latest inputs.
///
/// Heights are resolved through a [`PrefixSumExtents`] tree kept in sync
/// with the cache, so scroll handling costs O(log n) regardless of list
/// length.
///
/// ```
/// use virtual_scroll::{Keyed, ScrollAlign, VirtualScroll, VirtualScrollConfig};
///
/// struct Row(u32);
///
/// impl Keyed for Row {
///     type Key = u32;
///     fn id(&self) -> Option<u32> {
///         Some(self.0)
///     }
/// }
///
/// let mut list = VirtualScroll::with_items(
///     VirtualScrollConfig::default(),
///     (0..100).map(Row).collect(),
/// )
/// .unwrap();
/// list.on_container_resize(400.0);
///
/// assert_eq!(list.visible_range().as_range(), 0..5);
/// assert_eq!(list.total_height(), 8000.0);
///
/// let mut requested = None;
/// assert!(list.scroll_to_item(10, ScrollAlign::Center, &mut |top: f64| requested = Some(top)));
/// assert_eq!(requested, Some(640.0));
/// ```
#[derive(Debug)]
pub struct VirtualScroll<T: Keyed, S: Scalar = f64> {
    config: VirtualScrollConfig<S>,
    items: Vec<T>,
    keys: Vec<Option<T::Key>>,
    key_index: KeyIndex<T::Key>,
    cache: HeightCache<T::Key, S>,
    extents: PrefixSumExtents<S>,
    scroll_top: S,
    container_height: S,
    visible: VisibleRange,
}

impl<T: Keyed, S: Scalar> VirtualScroll<T, S> {
    /// Creates an engine with no items.
    pub fn new(config: VirtualScrollConfig<S>) -> Result<Self, ConfigError> {
        Self::with_items(config, Vec::new())
    }

    /// Creates an engine over `items`.
    ///
    /// The scroll position and container height start at zero, so nothing is
    /// visible until the host reports a container height.
    pub fn with_items(config: VirtualScrollConfig<S>, items: Vec<T>) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut engine = Self {
            config,
            items: Vec::new(),
            keys: Vec::new(),
            key_index: KeyIndex::default(),
            cache: HeightCache::new(),
            extents: PrefixSumExtents::new(),
            scroll_top: S::zero(),
            container_height: S::zero(),
            visible: VisibleRange::EMPTY,
        };
        engine.set_items(items);
        Ok(engine)
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &VirtualScrollConfig<S> {
        &self.config
    }

    /// Changes the overscan count.
    ///
    /// Overscan only affects [`VirtualScroll::virtual_items`], not the
    /// visible range.
    pub fn set_overscan(&mut self, overscan: usize) {
        self.config.overscan = overscan;
    }

    /// The items, in list order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the height cache.
    #[must_use]
    pub fn height_cache(&self) -> &HeightCache<T::Key, S> {
        &self.cache
    }

    /// Last scroll position reported through [`VirtualScroll::on_scroll`].
    #[must_use]
    pub fn scroll_top(&self) -> S {
        self.scroll_top
    }

    /// Last container height reported through
    /// [`VirtualScroll::on_container_resize`].
    #[must_use]
    pub fn container_height(&self) -> S {
        self.container_height
    }

    /// Replaces the whole list.
    ///
    /// If the height cache now holds more than one and a half entries per
    /// item, it is cleared.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.keys.clear();
        self.keys.extend(self.items.iter().map(Keyed::key));
        self.key_index.clear();
        for (index, key) in self.keys.iter().enumerate() {
            if let Some(key) = key {
                self.key_index.entry(key.clone()).or_default().push(index);
            }
        }
        self.enforce_cache_bound();
        self.rebuild_extents();
        self.refresh();
    }

    /// Appends one item.
    pub fn push_item(&mut self, item: T) {
        self.append(item);
        if self.enforce_cache_bound() {
            self.rebuild_extents();
        }
        self.refresh();
    }

    /// Appends several items.
    pub fn extend_items(&mut self, items: impl IntoIterator<Item = T>) {
        for item in items {
            self.append(item);
        }
        if self.enforce_cache_bound() {
            self.rebuild_extents();
        }
        self.refresh();
    }

    fn append(&mut self, item: T) {
        let index = self.items.len();
        let key = item.key();
        let height = self.cache.resolve(key.as_ref(), self.config.item_height);
        if let Some(key) = &key {
            self.key_index.entry(key.clone()).or_default().push(index);
        }
        self.keys.push(key);
        self.items.push(item);
        self.extents.push(height);
    }

    /// The prefix-sum height model backing this engine.
    #[must_use]
    pub fn extents(&self) -> &PrefixSumExtents<S> {
        &self.extents
    }

    /// Sum of all item heights, measured or estimated.
    #[must_use]
    pub fn total_height(&self) -> S {
        self.extents.total_height()
    }

    /// The items intersecting the viewport, before overscan.
    #[must_use]
    pub fn visible_range(&self) -> VisibleRange {
        self.visible
    }

    /// The index range [`VirtualScroll::virtual_items`] realizes.
    #[must_use]
    pub fn render_range(&self) -> Range<usize> {
        self.visible.expand(self.config.overscan, self.items.len())
    }

    /// The items to mount, with their offsets and heights.
    #[must_use]
    pub fn virtual_items(&self) -> Vec<VirtualItem<'_, T, S>> {
        self.compute_virtual_items(self.visible)
    }

    /// Computes the visible range for arbitrary scroll inputs.
    ///
    /// This does not change the engine's state.
    #[must_use]
    pub fn compute_visible_range(&self, scroll_top: S, container_height: S) -> VisibleRange {
        compute_visible_range(&self.extents, scroll_top, container_height)
    }

    /// Realizes `range` padded by the configured overscan.
    #[must_use]
    pub fn compute_virtual_items(&self, range: VisibleRange) -> Vec<VirtualItem<'_, T, S>> {
        compute_virtual_items(&self.extents, &self.items, range, self.config.overscan)
    }

    /// Offset of the top edge of `index`, or `None` if out of range.
    #[must_use]
    pub fn offset_of(&self, index: usize) -> Option<S> {
        (index < self.items.len()).then(|| self.extents.offset_of(index))
    }

    /// Resolved height of `index`, or `None` if out of range.
    #[must_use]
    pub fn height_of(&self, index: usize) -> Option<S> {
        (index < self.items.len()).then(|| self.extents.height_of(index))
    }

    /// A linear-scan view of the same heights, for cross-checking.
    #[must_use]
    pub fn linear_extents(&self) -> LinearExtents<'_, T::Key, S> {
        LinearExtents::new(&self.keys, &self.cache, self.config.item_height)
    }

    /// Records the measured height of the item with `key`.
    ///
    /// Every item carrying `key` picks up the new height and the visible
    /// range is recomputed, so the window may change without a scroll. A key
    /// that is not in the list yet is still cached and applies once an item
    /// with that key is added. Measurements never clear the cache; the bound
    /// is only enforced when the list changes.
    ///
    /// A `None` key or a negative or non-finite height is rejected and
    /// leaves all state unchanged.
    pub fn record_measured_height(
        &mut self,
        key: Option<T::Key>,
        height: S,
    ) -> Result<(), MeasureError> {
        let key = key.ok_or(MeasureError::MissingKey)?;
        if !height.is_finite() || height.is_sign_negative() {
            return Err(MeasureError::InvalidHeight);
        }

        if let Some(indices) = self.key_index.get(&key) {
            for &index in indices {
                self.extents.set_height(index, height);
            }
        }
        self.cache.insert(key, height);
        self.refresh();
        Ok(())
    }

    /// The scroll offset that brings `index` into view, or `None` if
    /// `index` is out of range.
    #[must_use]
    pub fn scroll_offset_for_item(&self, index: usize, align: ScrollAlign) -> Option<S> {
        scroll_offset_for_index(&self.extents, index, align, self.container_height)
    }

    /// Asks `host` to scroll `index` into view.
    ///
    /// Returns `false`, and issues nothing, if `index` is out of range. The
    /// engine's own scroll position is only updated once the host reports
    /// the scroll through [`VirtualScroll::on_scroll`].
    pub fn scroll_to_item(
        &self,
        index: usize,
        align: ScrollAlign,
        host: &mut impl ScrollHost<S>,
    ) -> bool {
        match self.scroll_offset_for_item(index, align) {
            Some(offset) => {
                host.set_scroll_top(offset);
                true
            }
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!(index, len = self.items.len(), "scroll target out of range");
                false
            }
        }
    }

    /// Handles a scroll event from the host.
    pub fn on_scroll(&mut self, scroll_top: S) {
        self.scroll_top = scroll_top.sanitize();
        self.refresh();
    }

    /// Handles a container resize from the host.
    pub fn on_container_resize(&mut self, height: S) {
        self.container_height = height.sanitize();
        self.refresh();
    }

    fn enforce_cache_bound(&mut self) -> bool {
        if !self.cache.exceeds_bound(self.items.len()) {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            entries = self.cache.len(),
            items = self.items.len(),
            "height cache cleared"
        );
        self.cache.clear();
        true
    }

    fn rebuild_extents(&mut self) {
        let default_height = self.config.item_height;
        let cache = &self.cache;
        self.extents.rebuild(
            self.keys
                .iter()
                .map(|key| cache.resolve(key.as_ref(), default_height)),
        );
    }

    fn refresh(&mut self) {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("virtual_scroll_refresh", items = self.items.len());
        #[cfg(feature = "tracing")]
        let _guard = span.enter();

        self.visible = compute_visible_range(&self.extents, self.scroll_top, self.container_height);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            start = self.visible.start,
            end = self.visible.end,
            scroll_top = ?self.scroll_top,
            container_height = ?self.container_height,
            "visible range recomputed"
        );
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::VirtualScroll;
    use crate::{ExtentModel, Keyed, MeasureError, ScrollAlign, VirtualScrollConfig, VisibleRange};

    #[derive(Debug, PartialEq)]
    struct Msg {
        id: Option<u32>,
        temp_id: Option<u32>,
    }

    impl Msg {
        fn sent(id: u32) -> Self {
            Self {
                id: Some(id),
                temp_id: None,
            }
        }
    }

    impl Keyed for Msg {
        type Key = u32;

        fn id(&self) -> Option<u32> {
            self.id
        }

        fn temp_id(&self) -> Option<u32> {
            self.temp_id
        }
    }

    fn engine(n: u32) -> VirtualScroll<Msg> {
        let mut engine =
            VirtualScroll::with_items(VirtualScrollConfig::default(), (0..n).map(Msg::sent).collect())
                .unwrap();
        engine.on_container_resize(400.0);
        engine
    }

    #[test]
    fn nothing_visible_before_first_resize() {
        let engine = VirtualScroll::with_items(
            VirtualScrollConfig::<f64>::default(),
            vec![Msg::sent(1), Msg::sent(2)],
        )
        .unwrap();
        assert!(engine.visible_range().is_empty());
        assert!(engine.virtual_items().is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = VirtualScrollConfig::default().with_item_height(0.0_f64);
        assert!(VirtualScroll::<Msg>::new(config).is_err());
    }

    #[test]
    fn measurement_moves_window_without_scroll() {
        let mut engine = engine(100);
        assert_eq!(engine.visible_range(), VisibleRange::new(0, 5));

        engine.record_measured_height(Some(0), 400.0).unwrap();
        assert_eq!(engine.visible_range(), VisibleRange::new(0, 1));
        assert_eq!(engine.total_height(), 8320.0);
    }

    #[test]
    fn rejected_measurements_leave_state_alone() {
        let mut engine = engine(10);
        assert_eq!(
            engine.record_measured_height(None, 10.0),
            Err(MeasureError::MissingKey)
        );
        assert_eq!(
            engine.record_measured_height(Some(1), -5.0),
            Err(MeasureError::InvalidHeight)
        );
        assert_eq!(
            engine.record_measured_height(Some(1), f64::NAN),
            Err(MeasureError::InvalidHeight)
        );
        assert!(engine.height_cache().is_empty());
        assert_eq!(engine.total_height(), 800.0);
    }

    #[test]
    fn pending_message_uses_temp_id() {
        let mut engine = engine(2);
        engine.push_item(Msg {
            id: None,
            temp_id: Some(900),
        });
        engine.record_measured_height(Some(900), 30.0).unwrap();
        assert_eq!(engine.height_of(2), Some(30.0));

        // Once persisted, the message is keyed by its id and loses the
        // provisional measurement.
        let mut items: Vec<Msg> = (0..2).map(Msg::sent).collect();
        items.push(Msg {
            id: Some(2),
            temp_id: Some(900),
        });
        engine.set_items(items);
        assert_eq!(engine.height_of(2), Some(80.0));
    }

    #[test]
    fn duplicate_keys_share_a_measurement() {
        let mut engine = VirtualScroll::with_items(
            VirtualScrollConfig::<f64>::default(),
            vec![Msg::sent(1), Msg::sent(1), Msg::sent(2)],
        )
        .unwrap();
        engine.record_measured_height(Some(1), 10.0).unwrap();
        assert_eq!(engine.height_of(0), Some(10.0));
        assert_eq!(engine.height_of(1), Some(10.0));
        assert_eq!(engine.total_height(), 100.0);
    }

    #[test]
    fn shrinking_list_clears_oversized_cache() {
        let mut engine = engine(10);
        for id in 0..10 {
            engine.record_measured_height(Some(id), 50.0).unwrap();
        }
        assert_eq!(engine.height_cache().len(), 10);

        engine.set_items((0..6).map(Msg::sent).collect());
        assert!(engine.height_cache().is_empty());
        // Surviving items fall back to the default estimate.
        assert_eq!(engine.total_height(), 480.0);
    }

    #[test]
    fn measurement_before_list_update_is_kept() {
        let mut engine = VirtualScroll::<Msg>::new(VirtualScrollConfig::default()).unwrap();
        engine.record_measured_height(Some(5), 200.0).unwrap();
        assert_eq!(engine.height_cache().len(), 1);

        engine.set_items(vec![Msg::sent(5)]);
        assert_eq!(engine.height_of(0), Some(200.0));
        assert_eq!(engine.total_height(), 200.0);
    }

    #[test]
    fn early_measurement_keeps_existing_ones() {
        let mut engine = engine(1);
        engine.record_measured_height(Some(0), 300.0).unwrap();
        // Key 1 is measured before its message is appended.
        engine.record_measured_height(Some(1), 40.0).unwrap();
        assert_eq!(engine.height_of(0), Some(300.0));

        engine.push_item(Msg::sent(1));
        assert_eq!(engine.height_of(0), Some(300.0));
        assert_eq!(engine.height_of(1), Some(40.0));
        assert_eq!(engine.total_height(), 340.0);
    }

    #[test]
    fn list_change_enforces_bound_left_by_measurements() {
        let mut engine = engine(2);
        for id in 0..4 {
            engine.record_measured_height(Some(id), 10.0).unwrap();
        }
        // 4 entries for 2 items: over the bound, but only a list change clears.
        assert_eq!(engine.height_cache().len(), 4);

        engine.push_item(Msg::sent(2));
        // 4 entries for 3 items is within 1.5 per item.
        assert_eq!(engine.height_cache().len(), 4);
        assert_eq!(engine.height_of(2), Some(10.0));

        engine.set_items(vec![Msg::sent(9)]);
        assert!(engine.height_cache().is_empty());
        assert_eq!(engine.total_height(), 80.0);
    }

    #[test]
    fn appends_keep_cached_heights_and_offsets() {
        let mut engine = engine(3);
        engine.record_measured_height(Some(3), 20.0).unwrap();
        engine.extend_items([Msg::sent(3), Msg::sent(4)]);

        assert_eq!(engine.len(), 5);
        assert_eq!(engine.height_of(3), Some(20.0));
        assert_eq!(engine.offset_of(4), Some(260.0));
        assert_eq!(engine.total_height(), 340.0);
        assert_eq!(
            engine.linear_extents().total_height(),
            engine.total_height()
        );
    }

    #[test]
    fn scroll_to_item_reports_out_of_range() {
        let engine = engine(100);
        let mut issued = Vec::new();
        let mut host = |top: f64| issued.push(top);

        assert!(!engine.scroll_to_item(100, ScrollAlign::Start, &mut host));
        assert!(engine.scroll_to_item(99, ScrollAlign::End, &mut host));
        assert_eq!(issued, vec![7600.0]);
        // The engine waits for the host to report the scroll.
        assert_eq!(engine.scroll_top(), 0.0);
    }

    #[test]
    fn overscan_can_change_at_runtime() {
        let mut engine = engine(100);
        engine.on_scroll(800.0);
        assert_eq!(engine.render_range(), 7..18);
        engine.set_overscan(0);
        assert_eq!(engine.render_range(), 10..15);
        assert_eq!(engine.virtual_items().len(), 5);
    }
}
