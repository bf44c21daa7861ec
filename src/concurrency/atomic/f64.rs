use core::sync::atomic::{AtomicU64, Ordering};

use crate::token::InvariantLifetime;

/// A branded `f64` cell backed by an `AtomicU64` holding the IEEE-754 bits.
///
/// Only plain loads and stores are offered; priorities are written once per
/// round by the owning worker and read by neighbors in the following round.
#[repr(transparent)]
pub struct GhostAtomicF64<'brand> {
    bits: AtomicU64,
    _brand: InvariantLifetime<'brand>,
}

impl<'brand> GhostAtomicF64<'brand> {
    /// Creates a new atomic float.
    #[inline(always)]
    pub fn new(value: f64) -> Self {
        Self {
            bits: AtomicU64::new(value.to_bits()),
            _brand: InvariantLifetime::new(),
        }
    }

    /// Loads the current value.
    #[inline(always)]
    pub fn load(&self, order: Ordering) -> f64 {
        f64::from_bits(self.bits.load(order))
    }

    /// Stores a new value.
    #[inline(always)]
    pub fn store(&self, value: f64, order: Ordering) {
        self.bits.store(value.to_bits(), order);
    }
}

// SAFETY: `AtomicU64` is Send + Sync; brand is a ZST marker.
unsafe impl<'brand> Send for GhostAtomicF64<'brand> {}
unsafe impl<'brand> Sync for GhostAtomicF64<'brand> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_exact_bits() {
        let cell = GhostAtomicF64::new(-1.0);
        assert_eq!(cell.load(Ordering::Relaxed), -1.0);

        let x = 0.123_456_789_012_345_67_f64;
        cell.store(x, Ordering::Relaxed);
        assert_eq!(cell.load(Ordering::Relaxed).to_bits(), x.to_bits());
    }
}
