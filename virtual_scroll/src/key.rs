// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable item keys.

use core::hash::Hash;

/// An item that can be identified across list updates.
///
/// Persisted items expose an `id`. Items that have not been persisted yet
/// (for example, a chat message that is still being sent) expose a
/// provisional `temp_id` instead. Measured heights are cached under
/// [`Keyed::key`], so an item keeps its measured height for as long as its
/// key stays the same.
///
/// Items without any key are still windowed, but always use the default
/// height and cannot be measured.
///
/// ```
/// use virtual_scroll::Keyed;
///
/// struct Message {
///     id: Option<u64>,
///     temp_id: Option<u64>,
/// }
///
/// impl Keyed for Message {
///     type Key = u64;
///
///     fn id(&self) -> Option<u64> {
///         self.id
///     }
///
///     fn temp_id(&self) -> Option<u64> {
///         self.temp_id
///     }
/// }
///
/// let pending = Message { id: None, temp_id: Some(7) };
/// assert_eq!(pending.key(), Some(7));
///
/// let sent = Message { id: Some(42), temp_id: Some(7) };
/// assert_eq!(sent.key(), Some(42));
/// ```
pub trait Keyed {
    /// Key type used by the height cache.
    type Key: Clone + Eq + Hash;

    /// The persisted identifier, if any.
    fn id(&self) -> Option<Self::Key>;

    /// The provisional identifier, if any.
    fn temp_id(&self) -> Option<Self::Key> {
        None
    }

    /// The key used for height caching: `id`, falling back to `temp_id`.
    fn key(&self) -> Option<Self::Key> {
        self.id().or_else(|| self.temp_id())
    }
}
