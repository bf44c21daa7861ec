//! Deterministic per-stage vertex priorities.
//!
//! `priority(seed, stage, vertex)` depends only on its three inputs, so every worker
//! computes the same value for a vertex regardless of thread count or scheduling.
//! Distinct `(stage, vertex)` pairs are spread by large odd multipliers and a
//! splitmix64 finalizer, giving effectively independent uniform draws.

/// Priority assigned to inactive vertices; below every real draw.
pub const INACTIVE_PRIORITY: f64 = -1.0;

const STAGE_MULTIPLIER: u64 = 0x9E37_79B9_7F4A_7C15;
const VERTEX_MULTIPLIER: u64 = 0xBF58_476D_1CE4_E5B9;

// 2^53: the number of distinct doubles in [0, 1) at unit-roundoff spacing.
const UNIT_SCALE: f64 = (1u64 << 53) as f64;

/// splitmix64 finalizer.
#[inline]
pub const fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Uniform draw in `[0, 1)` for `vertex` in `stage`.
#[inline]
pub fn priority(seed: u64, stage: u32, vertex: usize) -> f64 {
    let x = seed
        ^ u64::from(stage).wrapping_mul(STAGE_MULTIPLIER)
        ^ (vertex as u64).wrapping_mul(VERTEX_MULTIPLIER);
    let top53 = mix64(x) >> 11;
    top53 as f64 / UNIT_SCALE
}

/// `true` iff `(pv, v)` beats `(pu, u)` in the `(priority, id)` total order.
#[inline]
pub fn dominates(pv: f64, v: usize, pu: f64, u: usize) -> bool {
    pv > pu || (pv == pu && v > u)
}
