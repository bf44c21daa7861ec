//! Branded, lock-free atomic primitives for per-vertex state.
//!
//! The brand ties each atomic to one solve; it does not change the atomic's
//! concurrency behavior. Round code accesses these with `Relaxed` ordering and
//! relies on the round barrier for cross-thread visibility.

/// Branded `AtomicU64`.
pub mod u64;
/// Branded `f64` stored as bits in an `AtomicU64`.
pub mod f64;
/// Branded `AtomicUsize`.
pub mod usize;
/// Branded atomic bitsets.
pub mod bitset;

pub use bitset::GhostAtomicBitset;
pub use f64::GhostAtomicF64;
pub use u64::GhostAtomicU64;
pub use usize::GhostAtomicUsize;
