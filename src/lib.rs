//! # `luby_mis` - Parallel Round-Synchronized Luby MIS
//!
//! Computes a maximal independent set (MIS) of an undirected graph with Luby's
//! randomized algorithm, executed as a simulation of the synchronous distributed
//! model on one shared-memory machine: a fixed pool of worker threads processes the
//! vertex range in lock-step rounds separated by a full barrier.
//!
//! ## Guarantees
//!
//! ### Correctness
//! - **Independence**: no edge has both endpoints in the result.
//! - **Maximality**: every vertex outside the result has a neighbor inside it.
//! - **Termination**: every stage with an active vertex removes at least one vertex
//!   (the global `(priority, id)` maximum always wins).
//!
//! ### Determinism
//! - Priorities are a pure hash of `(seed, stage, vertex)`, so for a fixed graph and
//!   seed the MIS and the stage count are identical for every thread count.
//!
//! ### Concurrency Safety
//! - **Single writer per round**: the vertex range is split into contiguous blocks,
//!   one per worker; a vertex's own state is written only by its block's worker.
//! - **Barrier ordering**: every write of round `k` happens-before every read of
//!   round `k + 1`.
//! - **Branded state**: per-vertex atomics carry the brand of the solve that created
//!   them, so state from one solve cannot reach another. Commits run only after the
//!   barrier closes a round.
//!
//! ## Architecture
//!
//! 1. **Graph store** ([`graph`]): [`Graph`] builder over `1..=n`, frozen into a
//!    [`graph::CsrGraph`] at solve time.
//! 2. **Concurrency** ([`concurrency`]): branded atomics, the [`RoundBarrier`], and the
//!    [`RoundExecutor`] worker pool.
//! 3. **Engine** ([`mis`]): priority generator, vertex-state model, and the stage
//!    controller [`LubySolver`].
//!
//! ## Example
//!
//! ```rust
//! use luby_mis::{Graph, SolverConfig};
//!
//! let mut graph = Graph::new(4)?;
//! graph.add_edge(1, 2)?;
//! graph.add_edge(2, 3)?;
//! graph.add_edge(3, 4)?;
//!
//! let result = luby_mis::solve(&graph, &SolverConfig::new(2, 42)?)?;
//! assert_eq!(result.mis.len(), 2);
//! result.verify(&graph)?;
//! # Ok::<(), luby_mis::MisError>(())
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod concurrency;
pub mod config;
pub mod error;
pub mod graph;
pub mod mis;
pub mod token;

pub use concurrency::{Round, RoundBarrier, RoundExecutor, RoundKind, VertexTask};
pub use config::{SolverConfig, DEFAULT_SEED};
pub use error::{MisError, Result};
pub use graph::{verify_independent, verify_maximal, CsrGraph, Graph};
pub use mis::{solve, LubySolver, MisResult, StageRecord};
pub use token::{RoundPass, SolveToken};

// Compile-time layout checks.
const _: () = {
    use core::mem;

    // Capabilities are ZSTs.
    assert!(mem::size_of::<SolveToken<'static>>() == 0);
    assert!(mem::size_of::<RoundPass<'static>>() == 0);

    // Branded atomics are transparent over their std counterparts.
    assert!(
        mem::size_of::<concurrency::atomic::GhostAtomicF64<'static>>()
            == mem::size_of::<core::sync::atomic::AtomicU64>()
    );
    assert!(
        mem::size_of::<concurrency::atomic::GhostAtomicUsize<'static>>()
            == mem::size_of::<usize>()
    );
};
