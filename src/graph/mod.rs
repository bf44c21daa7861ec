//! Graph store for the MIS engine.
//!
//! - [`Graph`]: the caller-facing builder over vertices `1..=n` (adjacency lists).
//! - [`CsrGraph`]: the immutable CSR snapshot the engine scans during rounds.
//! - [`verify`]: post-condition checks for a returned vertex set.

pub mod adjacency;
pub mod csr;
pub mod parse;
pub mod verify;

pub use adjacency::Graph;
pub use csr::CsrGraph;
pub use verify::{verify_independent, verify_maximal};
