//! Undirected adjacency-list graph over vertices `1..=n`.

use crate::error::{MisError, Result};

/// Undirected multigraph over `1..=n` stored as adjacency lists.
///
/// Self-loops are dropped on insertion; parallel edges are kept.
///
/// ### Performance Characteristics
/// | Operation | Complexity |
/// |-----------|------------|
/// | `new` | \(O(n)\) |
/// | `add_edge` | amortized \(O(1)\) |
/// | `neighbors` | \(O(1)\) |
/// | `edges` | \(O(n + m)\) |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    n: usize,
    m: usize,
    // Index 0 is unused so vertex ids index directly.
    adj: Vec<Vec<usize>>,
}

impl Graph {
    /// Creates an edgeless graph with `n` vertices.
    ///
    /// # Errors
    /// [`MisError::InvalidVertexCount`] if `n == 0`.
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(MisError::InvalidVertexCount(n));
        }
        Ok(Self {
            n,
            m: 0,
            adj: vec![Vec::new(); n + 1],
        })
    }

    /// Builds a graph from an edge list.
    ///
    /// # Errors
    /// Same as [`Graph::new`] and [`Graph::add_edge`].
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut g = Self::new(n)?;
        for &(u, v) in edges {
            g.add_edge(u, v)?;
        }
        Ok(g)
    }

    /// The six-vertex demo graph: a 6-cycle with the chord `2-5`.
    pub fn demo() -> Self {
        let mut g = Self {
            n: 6,
            m: 0,
            adj: vec![Vec::new(); 7],
        };
        for (u, v) in [(1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (1, 6), (2, 5)] {
            g.push_edge(u, v);
        }
        g
    }

    /// Number of vertices.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of undirected edges, counting parallel edges and excluding self-loops.
    #[inline]
    pub fn m(&self) -> usize {
        self.m
    }

    /// Adds the undirected edge `u - v`.
    ///
    /// `u == v` is ignored. Parallel edges are allowed.
    ///
    /// # Errors
    /// [`MisError::VertexOutOfRange`] if either endpoint is outside `1..=n`; the
    /// graph is unchanged.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<()> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if u != v {
            self.push_edge(u, v);
        }
        Ok(())
    }

    /// Neighbors of `u`, with multiplicity.
    ///
    /// # Panics
    /// Panics if `u` is outside `1..=n`.
    #[inline]
    pub fn neighbors(&self, u: usize) -> &[usize] {
        assert!((1..=self.n).contains(&u), "vertex {u} out of range 1..={}", self.n);
        &self.adj[u]
    }

    /// Degree of `u`, counting parallel edges.
    ///
    /// # Panics
    /// Panics if `u` is outside `1..=n`.
    #[inline]
    pub fn degree(&self, u: usize) -> usize {
        self.neighbors(u).len()
    }

    /// Iterates every undirected edge once as `(u, v)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (1..=self.n).flat_map(move |u| {
            self.adj[u]
                .iter()
                .copied()
                .filter(move |&v| u < v)
                .map(move |v| (u, v))
        })
    }

    fn check_vertex(&self, vertex: usize) -> Result<()> {
        if (1..=self.n).contains(&vertex) {
            Ok(())
        } else {
            Err(MisError::VertexOutOfRange {
                vertex: i64::try_from(vertex).unwrap_or(i64::MAX),
                n: self.n,
            })
        }
    }

    fn push_edge(&mut self, u: usize, v: usize) {
        self.adj[u].push(v);
        self.adj[v].push(u);
        self.m += 1;
    }
}
