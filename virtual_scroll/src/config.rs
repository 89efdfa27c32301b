// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time configuration.

use crate::{ConfigError, Scalar};

/// Default estimate, in pixels, for items that have not been measured.
pub const DEFAULT_ITEM_HEIGHT: usize = 80;

/// Default number of extra items realized on each side of the visible range.
pub const DEFAULT_OVERSCAN: usize = 3;

/// Configuration for a [`VirtualScroll`](crate::VirtualScroll) engine.
///
/// ```
/// use virtual_scroll::VirtualScrollConfig;
///
/// let config = VirtualScrollConfig::<f64>::default()
///     .with_item_height(48.0)
///     .with_overscan(5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VirtualScrollConfig<S: Scalar = f64> {
    /// Height used for items without a cached measurement.
    pub item_height: S,
    /// Extra items realized before and after the visible range.
    pub overscan: usize,
}

impl<S: Scalar> VirtualScrollConfig<S> {
    /// Creates a configuration with explicit values.
    #[must_use]
    pub fn new(item_height: S, overscan: usize) -> Self {
        Self {
            item_height,
            overscan,
        }
    }

    /// Sets the default item height.
    #[must_use]
    pub fn with_item_height(mut self, item_height: S) -> Self {
        self.item_height = item_height;
        self
    }

    /// Sets the overscan count.
    #[must_use]
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Checks that the default item height is finite and positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_height.is_finite() && self.item_height > S::zero() {
            Ok(())
        } else {
            Err(ConfigError::InvalidItemHeight)
        }
    }
}

impl<S: Scalar> Default for VirtualScrollConfig<S> {
    fn default() -> Self {
        Self::new(S::from_usize(DEFAULT_ITEM_HEIGHT), DEFAULT_OVERSCAN)
    }
}
