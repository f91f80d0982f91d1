use crate::{Error, Graph, NodeId, Result, StepObserver, Tour, Weight, observer::StepEmitter};

use super::TourSolver;

/// Largest graph the enumeration accepts; (n - 1)! cycles are walked.
pub const MAX_BRUTE_FORCE_NODES: usize = 11;

/// Reference solver: tries every cycle through node 0 in lexicographic
/// order and keeps the first shortest one.
///
/// Events are reported once, for the edges of the winning tour.
#[derive(Clone, Copy, Debug, Default)]
pub struct BruteForceSolver;

struct Enumeration<'g> {
    graph: &'g Graph,
    path: Vec<NodeId>,
    visited: Vec<bool>,
    best: Option<(Vec<NodeId>, Weight)>,
    cycles: u64,
}

impl Enumeration<'_> {
    fn extend(&mut self, length: Weight) {
        let n = self.graph.node_count();
        let current = self.path[self.path.len() - 1];

        if self.path.len() == n {
            let Some(closing) = self.graph.try_weight(current, Tour::START) else {
                return;
            };
            let total = length + closing;
            self.cycles += 1;
            if self.best.as_ref().is_none_or(|(_, best)| total < *best) {
                let mut nodes = self.path.clone();
                nodes.push(Tour::START);
                self.best = Some((nodes, total));
            }
            return;
        }

        for next in 1..n {
            if self.visited[next] {
                continue;
            }
            let Some(weight) = self.graph.try_weight(current, next) else {
                continue;
            };
            // Weights are non-negative, so a prefix already at the best
            // length cannot finish strictly shorter.
            if let Some((_, best)) = &self.best
                && length + weight >= *best
            {
                continue;
            }
            self.visited[next] = true;
            self.path.push(next);
            self.extend(length + weight);
            self.path.pop();
            self.visited[next] = false;
        }
    }
}

impl BruteForceSolver {
    pub fn new() -> Self {
        Self
    }
}

impl TourSolver for BruteForceSolver {
    fn name(&self) -> &'static str {
        "brute-force"
    }

    fn solve_observed(&mut self, graph: &Graph, observer: &mut dyn StepObserver) -> Result<Tour> {
        let n = graph.node_count();
        if n == 1 {
            return Ok(Tour::trivial());
        }
        if n > MAX_BRUTE_FORCE_NODES {
            return Err(Error::invalid_input(format!(
                "brute force supports at most {MAX_BRUTE_FORCE_NODES} nodes, got {n}"
            )));
        }

        let mut visited = vec![false; n];
        visited[Tour::START] = true;
        let mut search = Enumeration {
            graph,
            path: vec![Tour::START],
            visited,
            best: None,
            cycles: 0,
        };
        search.extend(0);
        log::debug!("brute-force: cycles_checked={}", search.cycles);

        let (nodes, _) = search.best.ok_or(Error::NoTourFound)?;
        let tour = Tour::from_closed_walk(graph, nodes)?;

        let mut emitter = StepEmitter::new(observer);
        for &edge in tour.edges() {
            emitter.emit(edge);
        }
        log::info!("brute-force: done n={n} length={}", tour.length());
        Ok(tour)
    }
}

#[cfg(test)]
mod tests {
    use super::{BruteForceSolver, MAX_BRUTE_FORCE_NODES};
    use crate::{Error, Graph, StepRecorder, solver::TourSolver, solver::test_graphs};

    #[test]
    fn finds_square_optimum() {
        let graph = test_graphs::square();
        let mut recorder = StepRecorder::new();
        let tour = BruteForceSolver::new()
            .solve_observed(&graph, &mut recorder)
            .expect("solve");
        assert_eq!(tour.nodes(), &[0, 1, 2, 3, 0]);
        assert_eq!(tour.length(), 7);
        assert_eq!(recorder.len(), 4);
    }

    #[test]
    fn beats_greedy_when_greedy_is_misled() {
        // Greedy takes 0-1 then 1-2 and pays 100 to close from 3.
        let graph = Graph::new(
            4,
            [(0, 1, 1), (0, 2, 2), (0, 3, 100), (1, 2, 1), (1, 3, 3), (2, 3, 1)],
        )
        .expect("valid graph");
        let tour = BruteForceSolver::new().solve(&graph).expect("solve");
        assert_eq!(tour.nodes(), &[0, 1, 3, 2, 0]);
        assert_eq!(tour.length(), 1 + 3 + 1 + 2);
    }

    #[test]
    fn sparse_graph_uses_existing_cycle() {
        let graph = Graph::new(4, [(0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 0, 1), (0, 2, 1)])
            .expect("valid graph");
        let tour = BruteForceSolver::new().solve(&graph).expect("solve");
        assert_eq!(tour.length(), 4);
    }

    #[test]
    fn graph_without_cycle_has_no_tour() {
        let graph = Graph::new(3, [(0, 1, 1), (1, 2, 1)]).expect("valid graph");
        let err = BruteForceSolver::new().solve(&graph).expect_err("no cycle");
        assert!(matches!(err, Error::NoTourFound));
    }

    #[test]
    fn oversized_graph_is_rejected() {
        let graph = test_graphs::random(MAX_BRUTE_FORCE_NODES + 1, 0);
        let err = BruteForceSolver::new().solve(&graph).expect_err("too large");
        assert!(err.to_string().contains("at most 11 nodes"));
    }
}
