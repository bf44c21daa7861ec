//! Per-vertex solver state shared by all workers of one solve.
//!
//! Every field is a branded atomic indexed by vertex id (slot 0 unused). Within a
//! round, each vertex's own fields are written only by the worker whose block holds
//! it; neighbors' fields are only read, and were finalized in an earlier round. The
//! one cross-block write is the removal mark in round 3, which only ever sets a bit,
//! so racing winners produce the same result.
//!
//! Round-side accessors take a [`RoundPass`]. Stage bookkeeping takes
//! `&mut SolveToken`. Both carry the solve's brand; keeping commits out of running
//! rounds is the caller's job and the engine does it through the round barrier.

use core::sync::atomic::Ordering;

use crossbeam_utils::CachePadded;

use super::priority::INACTIVE_PRIORITY;
use crate::concurrency::atomic::{GhostAtomicBitset, GhostAtomicF64, GhostAtomicU64};
use crate::token::{RoundPass, SolveToken};

/// Winners and removed vertices of one committed stage, both ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageEffects {
    /// Vertices that joined the MIS.
    pub winners: Vec<usize>,
    /// Vertices that became inactive (winners included).
    pub removed: Vec<usize>,
}

/// Lock-free per-vertex state for vertices `1..=n`.
pub struct VertexStates<'brand> {
    n: usize,
    active: GhostAtomicBitset<'brand>,
    winner: GhostAtomicBitset<'brand>,
    marked: GhostAtomicBitset<'brand>,
    priority: Vec<GhostAtomicF64<'brand>>,
    messages: CachePadded<GhostAtomicU64<'brand>>,
}

impl<'brand> VertexStates<'brand> {
    /// Allocates state for `n` vertices, all active.
    pub fn new(n: usize) -> Self {
        let active = GhostAtomicBitset::new(n + 1);
        for u in 1..=n {
            active.set(u, Ordering::Relaxed);
        }
        Self {
            n,
            active,
            winner: GhostAtomicBitset::new(n + 1),
            marked: GhostAtomicBitset::new(n + 1),
            priority: (0..=n).map(|_| GhostAtomicF64::new(INACTIVE_PRIORITY)).collect(),
            messages: CachePadded::new(GhostAtomicU64::new(0)),
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    /// `true` if the graph has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    // ---- round side -------------------------------------------------------

    /// Whether `u` is still in the active induced subgraph.
    #[inline]
    pub fn is_active(&self, _pass: RoundPass<'brand>, u: usize) -> bool {
        self.active.is_set(u)
    }

    /// Priority drawn by `u` this stage.
    #[inline]
    pub fn priority(&self, _pass: RoundPass<'brand>, u: usize) -> f64 {
        self.priority[u].load(Ordering::Relaxed)
    }

    /// Records `u`'s priority for this stage.
    #[inline]
    pub fn set_priority(&self, _pass: RoundPass<'brand>, u: usize, value: f64) {
        self.priority[u].store(value, Ordering::Relaxed);
    }

    /// Whether `u` was selected as a winner this stage.
    #[inline]
    pub fn is_winner(&self, _pass: RoundPass<'brand>, u: usize) -> bool {
        self.winner.is_set(u)
    }

    /// Records whether `u` is a winner this stage.
    #[inline]
    pub fn set_winner(&self, _pass: RoundPass<'brand>, u: usize, winner: bool) {
        if winner {
            self.winner.set(u, Ordering::Relaxed);
        } else {
            self.winner.clear(u, Ordering::Relaxed);
        }
    }

    /// Marks `u` for removal at the end of this stage. Idempotent.
    #[inline]
    pub fn mark_for_removal(&self, _pass: RoundPass<'brand>, u: usize) {
        self.marked.set(u, Ordering::Relaxed);
    }

    /// Adds `count` simulated messages to the shared counter.
    #[inline]
    pub fn add_messages(&self, _pass: RoundPass<'brand>, count: u64) {
        if count != 0 {
            self.messages.fetch_add(count, Ordering::Relaxed);
        }
    }

    // ---- commit side ------------------------------------------------------

    /// `true` while any vertex is active.
    pub fn any_active(&self, _token: &SolveToken<'brand>) -> bool {
        self.active.any()
    }

    /// Number of active vertices.
    pub fn active_count(&self, _token: &SolveToken<'brand>) -> usize {
        self.active.count_ones()
    }

    /// Active vertices in ascending order.
    pub fn active_vertices(&self, _token: &SolveToken<'brand>) -> Vec<usize> {
        self.active.iter_ones().collect()
    }

    /// Total messages so far.
    pub fn messages(&self, _token: &SolveToken<'brand>) -> u64 {
        self.messages.load(Ordering::Relaxed)
    }

    /// Clears the per-stage winner and removal flags.
    pub fn begin_stage(&self, _token: &mut SolveToken<'brand>) {
        self.winner.clear_all();
        self.marked.clear_all();
    }

    /// Applies the stage: collects active winners, then deactivates every active
    /// vertex marked for removal.
    pub fn commit_stage(&self, _token: &mut SolveToken<'brand>) -> StageEffects {
        let winners: Vec<usize> = self
            .winner
            .iter_ones()
            .filter(|&u| self.active.is_set(u))
            .collect();

        let removed: Vec<usize> = self
            .marked
            .iter_ones()
            .filter(|&u| self.active.is_set(u))
            .collect();
        for &u in &removed {
            self.active.clear(u, Ordering::Relaxed);
        }

        StageEffects { winners, removed }
    }
}
