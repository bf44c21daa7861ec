//! Solver configuration.

use core::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::{MisError, Result};

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 42;

/// Worker-pool size and random seed for one solve.
///
/// `Default` uses every available core (at least two) and [`DEFAULT_SEED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    threads: NonZeroUsize,
    seed: u64,
}

impl SolverConfig {
    /// Creates a config with `threads` workers and `seed`.
    ///
    /// # Errors
    /// [`MisError::InvalidThreadCount`] if `threads == 0`.
    pub fn new(threads: usize, seed: u64) -> Result<Self> {
        let threads = NonZeroUsize::new(threads).ok_or(MisError::InvalidThreadCount(threads))?;
        Ok(Self { threads, seed })
    }

    /// Single-threaded config with `seed`.
    pub const fn sequential(seed: u64) -> Self {
        Self {
            threads: NonZeroUsize::MIN,
            seed,
        }
    }

    /// Returns a copy with `seed` replaced.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns a copy with `threads` replaced.
    ///
    /// # Errors
    /// [`MisError::InvalidThreadCount`] if `threads == 0`.
    pub fn with_threads(self, threads: usize) -> Result<Self> {
        Self::new(threads, self.seed)
    }

    /// Number of worker threads.
    #[inline]
    pub const fn threads(&self) -> NonZeroUsize {
        self.threads
    }

    /// Random seed.
    #[inline]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        let cores = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
        let threads = NonZeroUsize::new(cores.max(2)).unwrap_or(NonZeroUsize::MIN);
        Self {
            threads,
            seed: DEFAULT_SEED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_threads_rejected() {
        assert_eq!(SolverConfig::new(0, 1), Err(MisError::InvalidThreadCount(0)));
        assert_eq!(
            SolverConfig::sequential(1).with_threads(0),
            Err(MisError::InvalidThreadCount(0))
        );
    }

    #[test]
    fn default_has_at_least_two_threads() {
        let cfg = SolverConfig::default();
        assert!(cfg.threads().get() >= 2);
        assert_eq!(cfg.seed(), DEFAULT_SEED);
    }

    #[test]
    fn builder_methods() {
        let cfg = SolverConfig::new(3, 9).unwrap().with_seed(11);
        assert_eq!(cfg.threads().get(), 3);
        assert_eq!(cfg.seed(), 11);
        assert_eq!(SolverConfig::sequential(5).threads().get(), 1);
    }

    #[test]
    fn serde_roundtrip() {
        let cfg = SolverConfig::new(4, 7).unwrap();
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(json, r#"{"threads":4,"seed":7}"#);
        let back: SolverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
        assert!(serde_json::from_str::<SolverConfig>(r#"{"threads":0,"seed":7}"#).is_err());
    }
}
