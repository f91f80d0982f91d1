use std::fmt;

use crate::{Edge, Error, Graph, NodeId, Result, Weight};

/// Closed walk that starts and ends at [`Tour::START`] and visits every
/// other node exactly once.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tour {
    nodes: Vec<NodeId>,
    edges: Vec<Edge>,
    length: Weight,
}

impl Tour {
    pub const START: NodeId = 0;

    /// The tour of a single-node graph: `[0, 0]` with no edges.
    pub fn trivial() -> Self {
        Self {
            nodes: vec![Self::START, Self::START],
            edges: Vec::new(),
            length: 0,
        }
    }

    /// Builds a tour from a closed node sequence (`first == last == 0`),
    /// looking every edge up in `graph`.
    pub fn from_closed_walk(graph: &Graph, nodes: Vec<NodeId>) -> Result<Self> {
        check_closed_walk(graph.node_count(), &nodes)?;
        if graph.node_count() == 1 {
            return Ok(Self::trivial());
        }

        let edges = nodes
            .windows(2)
            .map(|pair| graph.edge(pair[0], pair[1]))
            .collect::<Result<Vec<_>>>()?;
        let length = edges.iter().map(|e| e.weight).sum();

        Ok(Self {
            nodes,
            edges,
            length,
        })
    }

    /// Builds a tour from an open cyclic order containing every node once.
    /// The order is rotated so the walk starts at node 0.
    pub fn from_cycle(graph: &Graph, order: &[NodeId]) -> Result<Self> {
        let start = order
            .iter()
            .position(|&node| node == Self::START)
            .ok_or_else(|| Error::other("invalid tour: cycle does not contain node 0"))?;

        let mut nodes = Vec::with_capacity(order.len() + 1);
        nodes.extend_from_slice(&order[start..]);
        nodes.extend_from_slice(&order[..start]);
        nodes.push(Self::START);
        Self::from_closed_walk(graph, nodes)
    }

    /// Node sequence of length `n + 1`.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Edges of the walk in traversal order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn length(&self) -> Weight {
        self.length
    }

    /// Re-checks the tour invariants against `graph` and returns the total
    /// recomputed from the graph's weights.
    pub fn verify(&self, graph: &Graph) -> Result<Weight> {
        check_closed_walk(graph.node_count(), &self.nodes)?;

        let mut total: Weight = 0;
        if graph.node_count() > 1 {
            for pair in self.nodes.windows(2) {
                total += graph.weight(pair[0], pair[1])?;
            }
        }
        if total != self.length {
            return Err(Error::other(format!(
                "invalid tour: stored length {} but edges sum to {total}",
                self.length
            )));
        }
        Ok(total)
    }

    pub fn metrics(&self) -> TourMetrics {
        if self.edges.is_empty() {
            log::info!("metrics: n<2 so there's nothing to report");
            return TourMetrics::default();
        }

        let longest = self.edges.iter().map(|e| e.weight).max().unwrap_or(0);
        let average = self.length as f64 / self.edges.len() as f64;
        log::info!(
            "metrics: edges={} total={} longest={longest} avg={average:.2}",
            self.edges.len(),
            self.length
        );

        TourMetrics {
            total: self.length,
            longest,
            average,
        }
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, node) in self.nodes.iter().enumerate() {
            if idx > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TourMetrics {
    pub total: Weight,
    pub longest: Weight,
    pub average: f64,
}

fn check_closed_walk(n: usize, nodes: &[NodeId]) -> Result<()> {
    if nodes.len() != n + 1 {
        return Err(Error::other(format!(
            "invalid tour: expected {} nodes, got {}",
            n + 1,
            nodes.len()
        )));
    }
    if nodes.first() != Some(&Tour::START) || nodes.last() != Some(&Tour::START) {
        return Err(Error::other(
            "invalid tour: walk must start and end at node 0",
        ));
    }

    let mut seen = vec![false; n];
    for &node in &nodes[..n] {
        match seen.get_mut(node) {
            Some(slot) if !*slot => *slot = true,
            Some(_) => {
                return Err(Error::other(format!(
                    "invalid tour: node {node} visited twice"
                )));
            }
            None => {
                return Err(Error::other(format!(
                    "invalid tour: node {node} outside 0..{n}"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Tour, TourMetrics};
    use crate::{Edge, Graph};

    fn square() -> Graph {
        Graph::new(
            4,
            [(0, 1, 1), (0, 2, 4), (0, 3, 3), (1, 2, 2), (1, 3, 5), (2, 3, 1)],
        )
        .expect("valid graph")
    }

    #[test]
    fn closed_walk_sums_edge_weights() {
        let graph = square();
        let tour = Tour::from_closed_walk(&graph, vec![0, 1, 2, 3, 0]).expect("tour");
        assert_eq!(tour.length(), 7);
        assert_eq!(tour.edges()[3], Edge::new(3, 0, 3));
        assert_eq!(tour.verify(&graph).expect("verify"), 7);
        assert_eq!(tour.to_string(), "0 -> 1 -> 2 -> 3 -> 0");
    }

    #[test]
    fn cycle_is_rotated_to_start_at_zero() {
        let graph = square();
        let tour = Tour::from_cycle(&graph, &[2, 3, 0, 1]).expect("tour");
        assert_eq!(tour.nodes(), &[0, 1, 2, 3, 0]);
        assert_eq!(tour.length(), 7);
    }

    #[test]
    fn repeated_node_is_rejected() {
        let graph = square();
        let err = Tour::from_closed_walk(&graph, vec![0, 1, 1, 3, 0]).expect_err("repeat");
        assert!(err.to_string().contains("node 1 visited twice"));
    }

    #[test]
    fn walk_must_return_to_start() {
        let graph = square();
        let err = Tour::from_closed_walk(&graph, vec![0, 1, 2, 3, 1]).expect_err("open walk");
        assert!(err.to_string().contains("start and end at node 0"));
    }

    #[test]
    fn wrong_length_is_rejected() {
        let graph = square();
        let err = Tour::from_closed_walk(&graph, vec![0, 1, 2, 0]).expect_err("short walk");
        assert!(err.to_string().contains("expected 5 nodes, got 4"));
    }

    #[test]
    fn trivial_tour_verifies_on_single_node_graph() {
        let graph = Graph::new(1, []).expect("valid graph");
        let tour = Tour::from_closed_walk(&graph, vec![0, 0]).expect("trivial");
        assert_eq!(tour, Tour::trivial());
        assert_eq!(tour.verify(&graph).expect("verify"), 0);
        assert_eq!(tour.metrics(), TourMetrics::default());
    }

    #[test]
    fn metrics_report_longest_and_average_edge() {
        let graph = square();
        let tour = Tour::from_closed_walk(&graph, vec![0, 1, 2, 3, 0]).expect("tour");
        let metrics = tour.metrics();
        assert_eq!(metrics.total, 7);
        assert_eq!(metrics.longest, 3);
        assert!((metrics.average - 1.75).abs() < 1e-9);
    }
}
