//! Concurrency primitives for round-synchronized parallel work.
//!
//! - [`atomic`]: branded lock-free cells and bitsets for per-vertex state.
//! - [`RoundBarrier`]: reusable phaser-style rendezvous between rounds.
//! - [`RoundExecutor`]: persistent worker pool running one vertex block per worker.
//!
//! Brands enforce which solve a piece of state belongs to, not synchronization.
//! Cross-thread visibility between rounds comes entirely from the barrier.

pub mod atomic;
pub mod barrier;
pub mod executor;
pub mod wait;

pub use barrier::RoundBarrier;
pub use executor::{partition, Round, RoundExecutor, RoundKind, VertexTask};
