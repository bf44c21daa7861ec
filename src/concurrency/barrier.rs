//! `RoundBarrier`: a reusable, phaser-style rendezvous for round-synchronized work.
//!
//! One orchestrator drives a fixed set of workers through a sequence of rounds:
//!
//! 1. [`RoundBarrier::dispatch`] registers exactly the number of parties taking part
//!    in the next round and opens the gate by bumping the generation.
//! 2. Each worker parked in [`RoundBarrier::await_dispatch`] wakes, runs its share,
//!    and calls [`RoundBarrier::arrive_and_deregister`].
//! 3. The orchestrator blocks in [`RoundBarrier::await_all`] until every registered
//!    party has arrived.
//!
//! The same barrier is reused for every round; nothing is allocated per round.
//!
//! ## Ordering
//!
//! Arrival is a release RMW on `pending`, and `await_all` acquires it, so every write
//! a worker made during round `k` happens-before the orchestrator returns from
//! `await_all`. Dispatch is a release RMW on `generation`, and `await_dispatch`
//! acquires it, so everything the orchestrator observed or wrote before dispatching
//! round `k + 1` happens-before any worker starts that round.

use core::sync::atomic::{AtomicU32, Ordering};

use crossbeam_utils::CachePadded;

use super::wait::{wait_on_u32, wake_all_u32};

/// Reusable round barrier. See the module docs for the protocol.
pub struct RoundBarrier {
    pending: CachePadded<AtomicU32>,
    generation: CachePadded<AtomicU32>,
}

impl RoundBarrier {
    /// Creates an idle barrier with no registered parties.
    pub const fn new() -> Self {
        Self {
            pending: CachePadded::new(AtomicU32::new(0)),
            generation: CachePadded::new(AtomicU32::new(0)),
        }
    }

    /// Current dispatch generation.
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation.load(Ordering::Acquire)
    }

    /// Number of registered parties that have not arrived yet.
    #[inline]
    pub fn pending(&self) -> u32 {
        self.pending.load(Ordering::Acquire)
    }

    /// Registers `parties` for the next round and releases parked workers.
    ///
    /// Returns the new generation.
    ///
    /// # Panics
    /// Panics if the previous round still has pending parties.
    pub fn dispatch(&self, parties: u32) -> u32 {
        let previous = self.pending.swap(parties, Ordering::AcqRel);
        assert_eq!(previous, 0, "dispatch while {previous} parties are still pending");
        self.open()
    }

    /// Bumps the generation without registering parties.
    ///
    /// Used to release parked workers for a command that needs no arrival, such as
    /// shutdown.
    pub fn open(&self) -> u32 {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel).wrapping_add(1);
        wake_all_u32(&self.generation);
        generation
    }

    /// Blocks until the generation moves past `seen`, returning the new generation.
    pub fn await_dispatch(&self, seen: u32) -> u32 {
        loop {
            let current = self.generation.load(Ordering::Acquire);
            if current != seen {
                return current;
            }
            wait_on_u32(&self.generation, seen);
        }
    }

    /// Signals that the calling party finished the current round.
    pub fn arrive_and_deregister(&self) {
        let before = self.pending.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(before != 0, "arrival without a registered party");
        if before == 1 {
            wake_all_u32(&self.pending);
        }
    }

    /// Blocks until every registered party has arrived.
    pub fn await_all(&self) {
        loop {
            let pending = self.pending.load(Ordering::Acquire);
            if pending == 0 {
                return;
            }
            wait_on_u32(&self.pending, pending);
        }
    }
}

impl Default for RoundBarrier {
    fn default() -> Self {
        Self::new()
    }
}
