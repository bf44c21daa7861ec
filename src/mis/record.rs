//! Solve results and per-stage observability records.

use serde::{Deserialize, Serialize};

use super::state::StageEffects;
use crate::error::Result;
use crate::graph::{verify_independent, verify_maximal, Graph};

/// Rounds executed per stage.
pub const ROUNDS_PER_STAGE: u64 = 3;

/// Snapshot emitted after each stage is committed. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRecord {
    /// 1-based stage number.
    pub stage: u32,
    /// Vertices that joined the MIS in this stage, ascending.
    pub winners: Vec<usize>,
    /// Vertices deactivated in this stage, ascending.
    pub removed: Vec<usize>,
    /// Vertices still active after this stage, ascending.
    pub active_remaining: Vec<usize>,
    /// MIS accumulated so far, ascending.
    pub mis_so_far: Vec<usize>,
}

impl StageRecord {
    pub(crate) fn new(
        stage: u32,
        effects: StageEffects,
        active_remaining: Vec<usize>,
        mis: &[usize],
    ) -> Self {
        let mut mis_so_far = mis.to_vec();
        mis_so_far.sort_unstable();
        Self {
            stage,
            winners: effects.winners,
            removed: effects.removed,
            active_remaining,
            mis_so_far,
        }
    }
}

/// Final outcome of a solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MisResult {
    /// MIS vertex ids, ascending and unique.
    pub mis: Vec<usize>,
    /// Stages executed.
    pub stages: u32,
    /// Rounds executed; always `stages * 3`.
    pub rounds: u64,
    /// Simulated messages: neighbor inspections plus removal notifications.
    pub messages: u64,
}

impl MisResult {
    pub(crate) fn new(mut mis: Vec<usize>, stages: u32, messages: u64) -> Self {
        mis.sort_unstable();
        mis.dedup();
        Self {
            mis,
            stages,
            rounds: u64::from(stages) * ROUNDS_PER_STAGE,
            messages,
        }
    }

    /// Number of vertices in the MIS.
    pub fn len(&self) -> usize {
        self.mis.len()
    }

    /// `true` if the MIS is empty (only possible for an empty result).
    pub fn is_empty(&self) -> bool {
        self.mis.is_empty()
    }

    /// Whether `vertex` is in the MIS.
    pub fn contains(&self, vertex: usize) -> bool {
        self.mis.binary_search(&vertex).is_ok()
    }

    /// Checks independence and maximality of the MIS against `graph`.
    ///
    /// # Errors
    /// The first violated post-condition.
    pub fn verify(&self, graph: &Graph) -> Result<()> {
        verify_independent(graph, &self.mis)?;
        verify_maximal(graph, &self.mis)
    }
}
