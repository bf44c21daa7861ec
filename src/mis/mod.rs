//! Parallel Luby maximal independent set.

pub mod engine;
pub mod priority;
pub mod record;
pub mod state;

pub use engine::{solve, LubySolver};
pub use priority::{dominates, priority, INACTIVE_PRIORITY};
pub use record::{MisResult, StageRecord, ROUNDS_PER_STAGE};
pub use state::{StageEffects, VertexStates};
