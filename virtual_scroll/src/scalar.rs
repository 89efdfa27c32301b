// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel scalar used across the engine.
//!
//! Item heights, list offsets, scroll positions, and container heights all
//! share one scalar type, chosen by the host to match its layout system:
//! `f32` for most GPU and DOM-style hosts, `f64` when transcripts grow long
//! enough for `f32` offsets to lose sub-pixel precision.
//!
//! Hosts report scroll positions and container sizes straight from platform
//! events, so [`Scalar::sanitize`] is applied to them before use. Measured
//! heights are validated instead, see
//! [`VirtualScroll::record_measured_height`](crate::VirtualScroll::record_measured_height).

use core::fmt::Debug;
use core::ops::{Add, Div, Sub};

/// Pixel scalar for heights, offsets, and scroll positions.
///
/// Implemented for `f32` and `f64`.
pub trait Scalar:
    Copy
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Div<Output = Self>
{
    /// Additive identity (typically `0.0`).
    fn zero() -> Self;

    /// Returns the maximum of `self` and `other`.
    fn max(self, other: Self) -> Self;

    /// Returns the minimum of `self` and `other`.
    fn min(self, other: Self) -> Self;

    /// Returns `true` if the value is finite (not NaN or infinite).
    fn is_finite(self) -> bool;

    /// Returns `true` if the value is negative, including `-0.0`.
    fn is_sign_negative(self) -> bool;

    /// Constructs from a `usize` lossily.
    fn from_usize(value: usize) -> Self;

    /// Clamps negative values to zero.
    fn clamp_non_negative(self) -> Self {
        if self.is_sign_negative() {
            Self::zero()
        } else {
            self
        }
    }

    /// Maps NaN, infinities, and negative values to zero.
    ///
    /// Used on host-supplied scroll offsets and container heights, which are
    /// not otherwise validated.
    fn sanitize(self) -> Self {
        if self.is_finite() {
            self.clamp_non_negative()
        } else {
            Self::zero()
        }
    }

    /// Returns half of the value.
    fn half(self) -> Self {
        self / Self::from_usize(2)
    }
}

impl Scalar for f32 {
    fn zero() -> Self {
        0.0
    }

    fn max(self, other: Self) -> Self {
        Self::max(self, other)
    }

    fn min(self, other: Self) -> Self {
        Self::min(self, other)
    }

    fn is_finite(self) -> bool {
        Self::is_finite(self)
    }

    fn is_sign_negative(self) -> bool {
        Self::is_sign_negative(self)
    }

    fn from_usize(value: usize) -> Self {
        value as Self
    }
}

impl Scalar for f64 {
    fn zero() -> Self {
        0.0
    }

    fn max(self, other: Self) -> Self {
        Self::max(self, other)
    }

    fn min(self, other: Self) -> Self {
        Self::min(self, other)
    }

    fn is_finite(self) -> bool {
        Self::is_finite(self)
    }

    fn is_sign_negative(self) -> bool {
        Self::is_sign_negative(self)
    }

    fn from_usize(value: usize) -> Self {
        value as Self
    }
}
