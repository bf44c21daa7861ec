use core::sync::atomic::{AtomicU64, Ordering};

use crate::token::InvariantLifetime;

/// A branded `AtomicU64`.
///
/// Used for accumulators shared by every worker of a solve, such as the message
/// counter.
#[repr(transparent)]
pub struct GhostAtomicU64<'brand> {
    inner: AtomicU64,
    _brand: InvariantLifetime<'brand>,
}

impl<'brand> GhostAtomicU64<'brand> {
    /// Creates a new atomic value.
    #[inline(always)]
    pub const fn new(value: u64) -> Self {
        Self {
            inner: AtomicU64::new(value),
            _brand: InvariantLifetime::new(),
        }
    }

    /// Loads the current value.
    #[inline(always)]
    pub fn load(&self, order: Ordering) -> u64 {
        self.inner.load(order)
    }

    /// Adds to the current value, returning the previous value.
    #[inline(always)]
    pub fn fetch_add(&self, value: u64, order: Ordering) -> u64 {
        self.inner.fetch_add(value, order)
    }
}

// SAFETY: `AtomicU64` is Send + Sync; brand is a ZST marker.
unsafe impl<'brand> Send for GhostAtomicU64<'brand> {}
unsafe impl<'brand> Sync for GhostAtomicU64<'brand> {}
