//! Post-condition checks for a vertex set returned by the solver.
//!
//! With the `parallel` feature the scans run on `rayon`; results and the reported
//! offending edge or vertex are the same either way (the smallest one is reported).

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::Graph;
use crate::error::{MisError, Result};

fn membership(graph: &Graph, set: &[usize]) -> Result<Vec<bool>> {
    let mut inside = vec![false; graph.n() + 1];
    for &u in set {
        if !(1..=graph.n()).contains(&u) {
            return Err(MisError::UnknownVertex {
                vertex: u,
                n: graph.n(),
            });
        }
        inside[u] = true;
    }
    Ok(inside)
}

fn first_internal_edge(graph: &Graph, inside: &[bool], u: usize) -> Option<(usize, usize)> {
    if !inside[u] {
        return None;
    }
    graph
        .neighbors(u)
        .iter()
        .copied()
        .filter(|&v| u < v && inside[v])
        .min()
        .map(|v| (u, v))
}

fn is_uncovered(graph: &Graph, inside: &[bool], u: usize) -> bool {
    !inside[u] && !graph.neighbors(u).iter().any(|&v| inside[v])
}

/// Checks that no edge of `graph` has both endpoints in `set`.
///
/// # Errors
/// [`MisError::NotIndependent`] with the lexicographically smallest offending edge,
/// or [`MisError::UnknownVertex`] if `set` names a vertex outside `1..=n`.
pub fn verify_independent(graph: &Graph, set: &[usize]) -> Result<()> {
    let inside = membership(graph, set)?;

    #[cfg(feature = "parallel")]
    let offending = (1..=graph.n())
        .into_par_iter()
        .filter_map(|u| first_internal_edge(graph, &inside, u))
        .min();
    #[cfg(not(feature = "parallel"))]
    let offending = (1..=graph.n()).find_map(|u| first_internal_edge(graph, &inside, u));

    match offending {
        Some((u, v)) => Err(MisError::NotIndependent { u, v }),
        None => Ok(()),
    }
}

/// Checks that every vertex outside `set` has a neighbor inside it.
///
/// # Errors
/// [`MisError::NotMaximal`] with the smallest uncovered vertex, or
/// [`MisError::UnknownVertex`] if `set` names a vertex outside `1..=n`.
pub fn verify_maximal(graph: &Graph, set: &[usize]) -> Result<()> {
    let inside = membership(graph, set)?;

    #[cfg(feature = "parallel")]
    let uncovered = (1..=graph.n())
        .into_par_iter()
        .filter(|&u| is_uncovered(graph, &inside, u))
        .min();
    #[cfg(not(feature = "parallel"))]
    let uncovered = (1..=graph.n()).find(|&u| is_uncovered(graph, &inside, u));

    match uncovered {
        Some(u) => Err(MisError::NotMaximal(u)),
        None => Ok(()),
    }
}
