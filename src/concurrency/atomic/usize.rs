use core::sync::atomic::{AtomicUsize, Ordering};

use crate::token::InvariantLifetime;

/// A branded `AtomicUsize`. Serves as one word of a [`super::GhostAtomicBitset`].
#[repr(transparent)]
pub struct GhostAtomicUsize<'brand> {
    inner: AtomicUsize,
    _brand: InvariantLifetime<'brand>,
}

impl<'brand> GhostAtomicUsize<'brand> {
    /// Creates a new branded atomic usize.
    #[inline(always)]
    pub const fn new(value: usize) -> Self {
        Self {
            inner: AtomicUsize::new(value),
            _brand: InvariantLifetime::new(),
        }
    }

    /// Loads the current value.
    #[inline(always)]
    pub fn load(&self, order: Ordering) -> usize {
        self.inner.load(order)
    }

    /// Stores a new value.
    #[inline(always)]
    pub fn store(&self, value: usize, order: Ordering) {
        self.inner.store(value, order);
    }

    /// Bitwise OR with the current value, returning the previous value.
    #[inline(always)]
    pub fn fetch_or(&self, value: usize, order: Ordering) -> usize {
        self.inner.fetch_or(value, order)
    }

    /// Bitwise AND with the current value, returning the previous value.
    #[inline(always)]
    pub fn fetch_and(&self, value: usize, order: Ordering) -> usize {
        self.inner.fetch_and(value, order)
    }
}

// SAFETY: `AtomicUsize` is Send + Sync; brand is a ZST marker.
unsafe impl<'brand> Send for GhostAtomicUsize<'brand> {}
unsafe impl<'brand> Sync for GhostAtomicUsize<'brand> {}
