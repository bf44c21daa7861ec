//! Invariant lifetime marker shared by every branded type.

use core::marker::PhantomData;

/// A marker type that is invariant in its lifetime parameter `'id`.
///
/// Brands must not shrink through subtyping, otherwise state from two different
/// solves could be unified under one brand.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvariantLifetime<'id>(PhantomData<fn(&'id ()) -> &'id ()>);

impl<'id> InvariantLifetime<'id> {
    /// Creates a new invariant lifetime marker.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}
