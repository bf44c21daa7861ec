//! Solve-scoped brand tokens.
//!
//! Every solve opens a fresh brand with [`SolveToken::new`]. All per-vertex state
//! allocated inside that closure carries the same `'brand`, so state from one solve
//! cannot be handed to the round tasks or the commit step of another.
//!
//! ## Two capabilities
//!
//! - [`SolveToken<'brand>`] is linear (not `Copy`/`Clone`). Stage bookkeeping that
//!   flips `active` flags or clears per-stage flags takes `&mut SolveToken`, which
//!   only the orchestrating thread holds.
//! - [`RoundPass<'brand>`] is a `Copy` zero-sized pass minted from a shared borrow
//!   of the token. Workers receive it with every vertex they process and present it
//!   to the round-side accessors of the vertex state.
//!
//! A pass borrows nothing, so holding `&mut SolveToken` does not stop round-side
//! writes at the type level. The brands only tie state to one solve. Rounds and
//! commits are kept apart by the round barrier: the orchestrator commits only after
//! `RoundExecutor::run` has returned.

pub mod invariant;

pub use invariant::InvariantLifetime;

/// Linear capability for one solve.
#[derive(Debug)]
pub struct SolveToken<'brand>(InvariantLifetime<'brand>);

impl<'brand> SolveToken<'brand> {
    /// Opens a fresh brand and runs `f` with its token.
    ///
    /// ```rust
    /// use luby_mis::SolveToken;
    ///
    /// let answer = SolveToken::new(|token| {
    ///     let _pass = token.pass();
    ///     7
    /// });
    /// assert_eq!(answer, 7);
    /// ```
    pub fn new<F, R>(f: F) -> R
    where
        F: for<'new_brand> FnOnce(SolveToken<'new_brand>) -> R,
    {
        f(SolveToken(InvariantLifetime::new()))
    }

    /// Mints a round pass for workers of this brand.
    #[inline(always)]
    pub const fn pass(&self) -> RoundPass<'brand> {
        RoundPass(InvariantLifetime::new())
    }
}

/// Shared, copyable authorization to touch vertex state during a round.
#[derive(Debug, Clone, Copy)]
pub struct RoundPass<'brand>(InvariantLifetime<'brand>);
