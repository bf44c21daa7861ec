//! The stage controller: Luby's algorithm as barrier-synchronized rounds.
//!
//! Each stage runs three rounds over `1..=n` on the worker pool:
//!
//! 1. **Priority draw**: active vertices draw `priority(seed, stage, u)`, inactive
//!    ones get the sentinel.
//! 2. **Winner selection**: an active vertex wins unless an active neighbor beats it
//!    in the `(priority, id)` order. The scan stops at the first such neighbor.
//! 3. **Removal propagation**: winners mark themselves and their active neighbors.
//!
//! Between stages the orchestrator commits the stage single-threaded: active winners
//! join the MIS, marked active vertices are deactivated, and a [`StageRecord`] is
//! emitted.
//!
//! ## Termination
//!
//! The active vertex with the largest `(priority, id)` has no dominating neighbor, so
//! every stage with an active vertex has a winner and removes at least that vertex.
//! The loop therefore runs at most `n` stages (expected `O(log n)`).

use super::priority::{dominates, priority, INACTIVE_PRIORITY};
use super::record::{MisResult, StageRecord};
use super::state::VertexStates;
use crate::concurrency::{Round, RoundExecutor, RoundKind, VertexTask};
use crate::config::SolverConfig;
use crate::error::Result;
use crate::graph::{CsrGraph, Graph};
use crate::token::{RoundPass, SolveToken};

/// Round tasks for one solve.
struct LubyRounds<'s, 'brand> {
    graph: &'s CsrGraph,
    states: &'s VertexStates<'brand>,
    seed: u64,
}

impl<'s, 'brand> LubyRounds<'s, 'brand> {
    fn draw_priority(&self, pass: RoundPass<'brand>, stage: u32, u: usize) {
        let value = if self.states.is_active(pass, u) {
            priority(self.seed, stage, u)
        } else {
            INACTIVE_PRIORITY
        };
        self.states.set_priority(pass, u, value);
    }

    fn select_winner(&self, pass: RoundPass<'brand>, u: usize) {
        let states = self.states;
        if !states.is_active(pass, u) {
            return;
        }

        let pu = states.priority(pass, u);
        let mut inspected = 0u64;
        let mut winner = true;
        for &v in self.graph.neighbors(u) {
            if !states.is_active(pass, v) {
                continue;
            }
            inspected += 1;
            if dominates(states.priority(pass, v), v, pu, u) {
                winner = false;
                break;
            }
        }

        states.set_winner(pass, u, winner);
        states.add_messages(pass, inspected);
    }

    fn propagate_removal(&self, pass: RoundPass<'brand>, u: usize) {
        let states = self.states;
        if !states.is_active(pass, u) || !states.is_winner(pass, u) {
            return;
        }

        states.mark_for_removal(pass, u);
        let mut notified = 0u64;
        for &v in self.graph.neighbors(u) {
            if states.is_active(pass, v) {
                // Other winners may mark `v` concurrently; setting the bit twice is fine.
                states.mark_for_removal(pass, v);
                notified += 1;
            }
        }
        states.add_messages(pass, notified);
    }
}

impl<'s, 'brand> VertexTask<'brand> for LubyRounds<'s, 'brand> {
    #[inline]
    fn run(&self, pass: RoundPass<'brand>, round: Round, vertex: usize) {
        match round.kind {
            RoundKind::PriorityDraw => self.draw_priority(pass, round.stage, vertex),
            RoundKind::WinnerSelection => self.select_winner(pass, vertex),
            RoundKind::RemovalPropagation => self.propagate_removal(pass, vertex),
        }
    }
}

/// Parallel Luby MIS solver over a borrowed graph.
///
/// ```rust
/// use luby_mis::{Graph, LubySolver, SolverConfig};
///
/// let graph = Graph::from_edges(3, &[(1, 2), (2, 3), (1, 3)]).unwrap();
/// let result = LubySolver::new(&graph, SolverConfig::new(2, 7).unwrap())
///     .solve()
///     .unwrap();
/// assert_eq!(result.mis.len(), 1);
/// assert_eq!(result.rounds, u64::from(result.stages) * 3);
/// ```
pub struct LubySolver<'g> {
    graph: &'g Graph,
    config: SolverConfig,
}

impl<'g> LubySolver<'g> {
    /// Creates a solver for `graph`.
    pub fn new(graph: &'g Graph, config: SolverConfig) -> Self {
        Self { graph, config }
    }

    /// The solver's configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Runs the algorithm to completion.
    ///
    /// # Errors
    /// [`crate::MisError::WorkerPanicked`] if a round task panicked.
    pub fn solve(&self) -> Result<MisResult> {
        self.run(None)
    }

    /// Runs the algorithm, handing every committed stage to `observer`.
    ///
    /// # Errors
    /// [`crate::MisError::WorkerPanicked`] if a round task panicked.
    pub fn solve_with<O>(&self, mut observer: O) -> Result<MisResult>
    where
        O: FnMut(&StageRecord),
    {
        self.run(Some(&mut observer))
    }

    // Stage records are only materialized when someone observes them.
    fn run(&self, mut observer: Option<&mut dyn FnMut(&StageRecord)>) -> Result<MisResult> {
        let span = tracing::info_span!(
            "luby_solve",
            n = self.graph.n(),
            m = self.graph.m(),
            threads = self.config.threads().get(),
            seed = self.config.seed(),
        );
        let _entered = span.enter();

        let csr = CsrGraph::from_graph(self.graph);
        let n = csr.vertex_count();
        let seed = self.config.seed();

        SolveToken::new(|mut token| {
            let states = VertexStates::new(n);
            let rounds = LubyRounds {
                graph: &csr,
                states: &states,
                seed,
            };

            let threads = self.config.threads();
            RoundExecutor::with_pool(token.pass(), threads, n, &rounds, |executor| -> Result<MisResult> {
                let mut mis = Vec::new();
                let mut stage = 0u32;

                while states.any_active(&token) {
                    stage += 1;
                    states.begin_stage(&mut token);

                    for kind in RoundKind::ALL {
                        tracing::trace!(stage, round = kind.name(), "round");
                        executor.run(Round::new(stage, kind))?;
                    }

                    let effects = states.commit_stage(&mut token);
                    debug_assert!(
                        !effects.winners.is_empty(),
                        "stage {stage} had active vertices but no winner"
                    );
                    mis.extend_from_slice(&effects.winners);

                    tracing::debug!(
                        stage,
                        winners = effects.winners.len(),
                        removed = effects.removed.len(),
                        active = states.active_count(&token),
                        mis = mis.len(),
                        "stage committed"
                    );
                    if let Some(observer) = observer.as_deref_mut() {
                        let active = states.active_vertices(&token);
                        observer(&StageRecord::new(stage, effects, active, &mis));
                    }
                }

                let result = MisResult::new(mis, stage, states.messages(&token));
                tracing::debug!(
                    mis = result.mis.len(),
                    stages = result.stages,
                    rounds = result.rounds,
                    messages = result.messages,
                    workers = executor.workers(),
                    "solve finished"
                );
                Ok(result)
            })
        })
    }
}

/// Solves `graph` with `config`; shorthand for [`LubySolver::solve`].
///
/// # Errors
/// See [`LubySolver::solve`].
pub fn solve(graph: &Graph, config: &SolverConfig) -> Result<MisResult> {
    LubySolver::new(graph, *config).solve()
}
