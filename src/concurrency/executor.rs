//! Persistent, block-partitioned worker pool driven round by round.
//!
//! [`RoundExecutor::with_pool`] spawns one scoped worker per non-empty vertex block
//! and keeps them parked on a [`RoundBarrier`] for the whole solve. Each call to
//! [`RoundExecutor::run`] publishes a [`Round`], releases the workers, and blocks
//! until all of them have processed their entire block.
//!
//! Blocks are contiguous, non-overlapping ranges of `1..=n` of size
//! `ceil(n / threads)`, so within one round every vertex has exactly one writer.

use core::num::NonZeroUsize;
use core::ops::RangeInclusive;
use core::sync::atomic::{AtomicU64, Ordering};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, PoisonError};

use crate::concurrency::RoundBarrier;
use crate::error::{MisError, Result};
use crate::token::RoundPass;

/// The three rounds of a stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RoundKind {
    /// Round 1: every active vertex draws its priority.
    PriorityDraw = 1,
    /// Round 2: every active vertex checks whether it is a local maximum.
    WinnerSelection = 2,
    /// Round 3: winners mark themselves and their active neighbors for removal.
    RemovalPropagation = 3,
}

impl RoundKind {
    /// All rounds of a stage in order.
    pub const ALL: [RoundKind; 3] = [
        RoundKind::PriorityDraw,
        RoundKind::WinnerSelection,
        RoundKind::RemovalPropagation,
    ];

    /// Short name used in logs and errors.
    pub const fn name(self) -> &'static str {
        match self {
            RoundKind::PriorityDraw => "priority draw",
            RoundKind::WinnerSelection => "winner selection",
            RoundKind::RemovalPropagation => "removal propagation",
        }
    }

    const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(RoundKind::PriorityDraw),
            2 => Some(RoundKind::WinnerSelection),
            3 => Some(RoundKind::RemovalPropagation),
            _ => None,
        }
    }
}

/// One round of one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Round {
    /// 1-based stage number.
    pub stage: u32,
    /// Which of the three rounds.
    pub kind: RoundKind,
}

impl Round {
    /// Creates a round descriptor.
    pub const fn new(stage: u32, kind: RoundKind) -> Self {
        Self { stage, kind }
    }

    // Tag 0 is reserved for shutdown.
    const SHUTDOWN: u64 = 0;

    const fn encode(self) -> u64 {
        ((self.stage as u64) << 8) | self.kind as u64
    }

    const fn decode(word: u64) -> Option<Self> {
        match RoundKind::from_tag((word & 0xff) as u8) {
            Some(kind) => Some(Round {
                stage: (word >> 8) as u32,
                kind,
            }),
            None => None,
        }
    }
}

/// Work applied to every vertex of a block during a round.
///
/// Implementations must only write state owned by `vertex`, except for writes that
/// are idempotent across workers (such as setting a flag to `true`).
pub trait VertexTask<'brand>: Sync {
    /// Processes one vertex for `round`.
    fn run(&self, pass: RoundPass<'brand>, round: Round, vertex: usize);
}

/// Splits `1..=vertices` into at most `threads` contiguous blocks of
/// `ceil(vertices / threads)` vertices. Empty trailing blocks are dropped.
pub fn partition(vertices: usize, threads: NonZeroUsize) -> Vec<RangeInclusive<usize>> {
    let threads = threads.get();
    let block = vertices.div_ceil(threads);
    (0..threads)
        .filter_map(|t| {
            let start = 1 + t * block;
            let end = vertices.min((t + 1) * block);
            (start <= end).then_some(start..=end)
        })
        .collect()
}

struct Fault {
    worker: usize,
    round: Round,
    message: String,
}

struct PoolShared {
    barrier: RoundBarrier,
    command: AtomicU64,
    fault: Mutex<Option<Fault>>,
}

impl PoolShared {
    fn record_fault(&self, worker: usize, round: Round, message: String) {
        let mut slot = self.fault.lock().unwrap_or_else(PoisonError::into_inner);
        // Keep the first fault; later ones are usually consequences of it.
        if slot.is_none() {
            *slot = Some(Fault {
                worker,
                round,
                message,
            });
        }
    }

    fn take_fault(&self) -> Option<Fault> {
        self.fault
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn shutdown(&self) {
        self.command.store(Round::SHUTDOWN, Ordering::Relaxed);
        self.barrier.open();
    }
}

struct ShutdownOnDrop<'a>(&'a PoolShared);

impl Drop for ShutdownOnDrop<'_> {
    fn drop(&mut self) {
        self.0.shutdown();
    }
}

/// Handle to a running worker pool; see the module docs.
pub struct RoundExecutor<'a, 'brand> {
    shared: &'a PoolShared,
    blocks: &'a [RangeInclusive<usize>],
    _pass: RoundPass<'brand>,
}

impl<'a, 'brand> RoundExecutor<'a, 'brand> {
    /// Starts a pool of up to `threads` workers over `1..=vertices`, runs `f` with a
    /// handle to it, and tears the pool down when `f` returns.
    ///
    /// Workers are scoped threads, so `task` may borrow from the caller's stack.
    pub fn with_pool<T, R, F>(
        pass: RoundPass<'brand>,
        threads: NonZeroUsize,
        vertices: usize,
        task: &T,
        f: F,
    ) -> R
    where
        T: VertexTask<'brand>,
        F: for<'x> FnOnce(&RoundExecutor<'x, 'brand>) -> R,
    {
        let blocks = partition(vertices, threads);
        let shared = PoolShared {
            barrier: RoundBarrier::new(),
            command: AtomicU64::new(Round::SHUTDOWN),
            fault: Mutex::new(None),
        };

        tracing::debug!(
            workers = blocks.len(),
            vertices,
            block_size = blocks.first().map_or(0, |b| b.end() - b.start() + 1),
            "starting round worker pool"
        );

        std::thread::scope(|scope| {
            for (worker, block) in blocks.iter().cloned().enumerate() {
                let shared = &shared;
                scope.spawn(move || worker_loop(shared, task, pass, worker, block));
            }

            let _shutdown = ShutdownOnDrop(&shared);
            let executor = RoundExecutor {
                shared: &shared,
                blocks: &blocks,
                _pass: pass,
            };
            f(&executor)
        })
    }

    /// Number of workers in the pool (non-empty blocks).
    pub fn workers(&self) -> usize {
        self.blocks.len()
    }

    /// The vertex block assigned to each worker.
    pub fn blocks(&self) -> &[RangeInclusive<usize>] {
        self.blocks
    }

    /// Runs `round` on every block and blocks until all workers are done.
    ///
    /// # Errors
    /// Returns [`MisError::WorkerPanicked`] if any worker's task panicked during the
    /// round. The round is then incomplete and the caller must abandon the solve.
    pub fn run(&self, round: Round) -> Result<()> {
        if self.blocks.is_empty() {
            return Ok(());
        }

        self.shared.command.store(round.encode(), Ordering::Relaxed);
        // `blocks.len() <= threads`; more than `u32::MAX` workers is not a real pool.
        let parties = u32::try_from(self.blocks.len()).unwrap_or(u32::MAX);
        self.shared.barrier.dispatch(parties);
        self.shared.barrier.await_all();

        match self.shared.take_fault() {
            Some(fault) => Err(MisError::WorkerPanicked {
                worker: fault.worker,
                stage: fault.round.stage,
                round: fault.round.kind.name(),
                message: fault.message,
            }),
            None => Ok(()),
        }
    }
}

fn worker_loop<'brand, T: VertexTask<'brand>>(
    shared: &PoolShared,
    task: &T,
    pass: RoundPass<'brand>,
    worker: usize,
    block: RangeInclusive<usize>,
) {
    let mut seen = 0;
    loop {
        seen = shared.barrier.await_dispatch(seen);
        let Some(round) = Round::decode(shared.command.load(Ordering::Relaxed)) else {
            return;
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            for vertex in block.clone() {
                task.run(pass, round, vertex);
            }
        }));
        if let Err(payload) = outcome {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_owned())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_owned());
            shared.record_fault(worker, round, message);
        }

        shared.barrier.arrive_and_deregister();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::SolveToken;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn partition_covers_range_without_overlap() {
        assert_eq!(partition(10, nz(3)), vec![1..=4, 5..=8, 9..=10]);
        assert_eq!(partition(4, nz(4)), vec![1..=1, 2..=2, 3..=3, 4..=4]);
        assert_eq!(partition(1, nz(4)), vec![1..=1]);
        // ceil(5/4) = 2 leaves the fourth block empty.
        assert_eq!(partition(5, nz(4)), vec![1..=2, 3..=4, 5..=5]);
        assert!(partition(0, nz(2)).is_empty());
    }

    #[test]
    fn round_encoding_roundtrips() {
        for kind in RoundKind::ALL {
            let round = Round::new(123_456, kind);
            assert_eq!(Round::decode(round.encode()), Some(round));
        }
        assert_eq!(Round::decode(Round::SHUTDOWN), None);
    }

    struct Touch {
        hits: Vec<AtomicU64>,
    }

    impl<'brand> VertexTask<'brand> for Touch {
        fn run(&self, _pass: RoundPass<'brand>, round: Round, vertex: usize) {
            self.hits[vertex].fetch_add(round.kind as u64, Ordering::Relaxed);
        }
    }

    #[test]
    fn every_vertex_runs_once_per_round() {
        let n = 37;
        let task = Touch {
            hits: (0..=n).map(|_| AtomicU64::new(0)).collect(),
        };

        SolveToken::new(|token| {
            RoundExecutor::with_pool(token.pass(), nz(4), n, &task, |exec| {
                assert_eq!(exec.workers(), 4);
                for kind in RoundKind::ALL {
                    exec.run(Round::new(1, kind)).unwrap();
                }
            });
        });

        assert_eq!(task.hits[0].load(Ordering::Relaxed), 0);
        for v in 1..=n {
            assert_eq!(task.hits[v].load(Ordering::Relaxed), 1 + 2 + 3, "vertex {v}");
        }
    }

    struct Explode;

    impl<'brand> VertexTask<'brand> for Explode {
        fn run(&self, _pass: RoundPass<'brand>, round: Round, vertex: usize) {
            if round.kind == RoundKind::WinnerSelection && vertex == 3 {
                panic!("boom at {vertex}");
            }
        }
    }

    #[test]
    fn worker_panic_fails_the_round() {
        let err = SolveToken::new(|token| {
            RoundExecutor::with_pool(token.pass(), nz(2), 4, &Explode, |exec| {
                exec.run(Round::new(1, RoundKind::PriorityDraw))?;
                exec.run(Round::new(1, RoundKind::WinnerSelection))
            })
        })
        .unwrap_err();

        match err {
            MisError::WorkerPanicked {
                worker,
                stage,
                round,
                message,
            } => {
                assert_eq!(worker, 1);
                assert_eq!(stage, 1);
                assert_eq!(round, "winner selection");
                assert_eq!(message, "boom at 3");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
