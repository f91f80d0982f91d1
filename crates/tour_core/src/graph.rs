use std::{fmt, ops::Range};

use crate::{Error, Result};

pub type NodeId = usize;
pub type Weight = u64;

/// An edge as traversed: `from -> to`. The underlying graph edge is unordered.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Weight,
}

impl Edge {
    pub const fn new(from: NodeId, to: NodeId, weight: Weight) -> Self {
        Self { from, to, weight }
    }

    /// Orientation-free identity of the edge.
    pub fn key(&self) -> (NodeId, NodeId) {
        (self.from.min(self.to), self.from.max(self.to))
    }

    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    pub fn reversed(self) -> Self {
        Self::new(self.to, self.from, self.weight)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{} ({})", self.from, self.to, self.weight)
    }
}

/// Immutable undirected weighted graph over nodes `0..n`.
///
/// Edges keep the order in which they were supplied; `edges()` and
/// `edges_from()` both iterate in that order, which makes every solver
/// reproducible for a given construction.
#[derive(Clone, Debug)]
pub struct Graph {
    n: usize,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<(NodeId, Weight)>>,
    // Flattened n*n matrix, both orientations filled.
    weights: Vec<Option<Weight>>,
}

impl Graph {
    pub fn new<I>(n: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NodeId, NodeId, Weight)>,
    {
        if n == 0 {
            return Err(Error::invalid_graph("graph must contain at least one node"));
        }

        let cells = n.checked_mul(n).ok_or_else(|| {
            Error::invalid_graph(format!("{n} nodes overflow the weight matrix"))
        })?;
        let mut weights = Vec::new();
        weights.try_reserve_exact(cells).map_err(|e| {
            Error::invalid_graph(format!("cannot allocate weight matrix for {n} nodes: {e}"))
        })?;
        weights.resize(cells, None);

        let mut graph = Self {
            n,
            edges: Vec::new(),
            adjacency: vec![Vec::new(); n],
            weights,
        };

        for (u, v, w) in edges {
            if u >= n || v >= n {
                return Err(Error::invalid_graph(format!(
                    "edge ({u}, {v}) references a node outside 0..{n}"
                )));
            }
            if u == v {
                return Err(Error::invalid_graph(format!("self-loop on node {u}")));
            }
            if graph.weights[u * n + v].is_some() {
                return Err(Error::invalid_graph(format!(
                    "duplicate edge between nodes {u} and {v}"
                )));
            }

            graph.weights[u * n + v] = Some(w);
            graph.weights[v * n + u] = Some(w);
            graph.adjacency[u].push((v, w));
            graph.adjacency[v].push((u, w));
            graph.edges.push(Edge::new(u, v, w));
        }

        log::debug!(
            "graph: built n={n} edges={} complete={}",
            graph.edges.len(),
            graph.is_complete()
        );

        Ok(graph)
    }

    pub fn node_count(&self) -> usize {
        self.n
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> Range<NodeId> {
        0..self.n
    }

    /// Weight of the edge `{u, v}`. A missing edge is an invariant violation
    /// for the solvers, which all assume a complete graph.
    pub fn weight(&self, u: NodeId, v: NodeId) -> Result<Weight> {
        self.try_weight(u, v)
            .ok_or_else(|| Error::edge_not_found(u, v))
    }

    pub fn try_weight(&self, u: NodeId, v: NodeId) -> Option<Weight> {
        if u >= self.n || v >= self.n {
            return None;
        }
        self.weights[u * self.n + v]
    }

    pub fn edge(&self, u: NodeId, v: NodeId) -> Result<Edge> {
        Ok(Edge::new(u, v, self.weight(u, v)?))
    }

    /// Neighbours of `u` with edge weights, in insertion order.
    pub fn edges_from(&self, u: NodeId) -> &[(NodeId, Weight)] {
        self.adjacency.get(u).map(Vec::as_slice).unwrap_or_default()
    }

    /// All edges in the order they were supplied.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_complete(&self) -> bool {
        self.n
            .checked_mul(self.n - 1)
            .is_some_and(|pairs| self.edges.len() == pairs / 2)
    }
}
