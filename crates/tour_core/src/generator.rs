use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{Error, Graph, Result, Weight};

pub const MAX_GENERATED_NODES: usize = 1000;

/// Complete graph on `n` nodes with weights drawn uniformly from
/// `1..=max_weight`. The same seed always yields the same graph.
pub fn complete_graph(n: usize, max_weight: Weight, seed: u64) -> Result<Graph> {
    if !(1..=MAX_GENERATED_NODES).contains(&n) {
        return Err(Error::invalid_input(format!(
            "node count must be in 1..={MAX_GENERATED_NODES}, got {n}"
        )));
    }
    if max_weight == 0 {
        return Err(Error::invalid_input("max weight must be at least 1"));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = Vec::with_capacity(n * (n - 1) / 2);
    for u in 0..n {
        for v in (u + 1)..n {
            edges.push((u, v, rng.random_range(1..=max_weight)));
        }
    }

    log::debug!("generator: n={n} edges={} max_weight={max_weight} seed={seed}", edges.len());
    Graph::new(n, edges)
}

#[cfg(test)]
mod tests {
    use super::{MAX_GENERATED_NODES, complete_graph};

    #[test]
    fn generated_graph_is_complete_with_bounded_weights() {
        let graph = complete_graph(9, 20, 1).expect("graph");
        assert!(graph.is_complete());
        assert_eq!(graph.edge_count(), 36);
        assert!(graph.edges().iter().all(|e| (1..=20).contains(&e.weight)));
    }

    #[test]
    fn same_seed_same_weights() {
        let a = complete_graph(6, 100, 77).expect("graph");
        let b = complete_graph(6, 100, 77).expect("graph");
        assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn single_node_has_no_edges() {
        let graph = complete_graph(1, 10, 0).expect("graph");
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn out_of_range_arguments_are_rejected() {
        let err = complete_graph(0, 10, 0).expect_err("no nodes");
        assert!(err.to_string().contains("node count must be in"));
        assert!(complete_graph(MAX_GENERATED_NODES + 1, 10, 0).is_err());
        let err = complete_graph(4, 0, 0).expect_err("zero weight");
        assert!(err.to_string().contains("max weight"));
    }
}
