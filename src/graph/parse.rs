//! Whitespace-delimited integer graph input.
//!
//! Format: `N M` followed by `M` pairs `u v`, separated by any ASCII whitespace.
//! Tokens after the last edge are ignored.

use std::io::Read;

use super::Graph;
use crate::error::{MisError, Result};

impl Graph {
    /// Reads a graph from `reader`.
    ///
    /// Returns `Ok(None)` when the input holds no tokens at all, so callers can fall
    /// back to a default graph.
    ///
    /// # Errors
    /// - [`MisError::Parse`] for non-integer tokens, a negative edge count, or input
    ///   that ends before all `M` edges were read.
    /// - [`MisError::InvalidVertexCount`] / [`MisError::VertexOutOfRange`] for
    ///   invalid sizes or endpoints.
    /// - [`MisError::Io`] if reading fails.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Option<Self>> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    /// Parses a graph from text; see [`Graph::from_reader`].
    ///
    /// # Errors
    /// Same as [`Graph::from_reader`], minus I/O.
    pub fn parse(text: &str) -> Result<Option<Self>> {
        let mut tokens = Tokens {
            inner: text.split_ascii_whitespace(),
            read: 0,
        };

        let Some(n) = tokens.next_opt()? else {
            return Ok(None);
        };
        let n = usize::try_from(n)
            .map_err(|_| MisError::Parse(format!("vertex count must be positive, got {n}")))?;
        let mut graph = Graph::new(n)?;

        let m = tokens.next("edge count")?;
        let m = usize::try_from(m)
            .map_err(|_| MisError::Parse(format!("edge count must be non-negative, got {m}")))?;

        for _ in 0..m {
            let u = endpoint(tokens.next("edge endpoint")?, n)?;
            let v = endpoint(tokens.next("edge endpoint")?, n)?;
            graph.add_edge(u, v)?;
        }

        Ok(Some(graph))
    }
}

fn endpoint(raw: i64, n: usize) -> Result<usize> {
    usize::try_from(raw).map_err(|_| MisError::VertexOutOfRange { vertex: raw, n })
}

struct Tokens<'a> {
    inner: std::str::SplitAsciiWhitespace<'a>,
    read: usize,
}

impl Tokens<'_> {
    fn next_opt(&mut self) -> Result<Option<i64>> {
        match self.inner.next() {
            None => Ok(None),
            Some(tok) => {
                self.read += 1;
                tok.parse::<i64>().map(Some).map_err(|_| {
                    MisError::Parse(format!("token {} ({tok:?}) is not an integer", self.read))
                })
            }
        }
    }

    fn next(&mut self, what: &str) -> Result<i64> {
        self.next_opt()?.ok_or_else(|| {
            MisError::Parse(format!(
                "unexpected end of input after {} tokens, expected {what}",
                self.read
            ))
        })
    }
}
