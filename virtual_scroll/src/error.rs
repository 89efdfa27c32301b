// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use core::fmt;

/// Error returned when a [`VirtualScrollConfig`](crate::VirtualScrollConfig)
/// cannot be used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The default item height is zero, negative, NaN, or infinite.
    InvalidItemHeight,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidItemHeight => {
                f.write_str("default item height must be finite and greater than zero")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// Error returned when a height measurement is rejected.
///
/// A rejected measurement leaves the height cache and the visible range
/// untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeasureError {
    /// The measured item has neither an `id` nor a `temp_id`.
    MissingKey,
    /// The measured height is negative, NaN, or infinite.
    InvalidHeight,
}

impl fmt::Display for MeasureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey => f.write_str("measured item has no key"),
            Self::InvalidHeight => {
                f.write_str("measured height must be finite and non-negative")
            }
        }
    }
}

impl core::error::Error for MeasureError {}
