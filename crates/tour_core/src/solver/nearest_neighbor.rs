use crate::{
    Edge, Error, Graph, NodeId, Result, StepObserver, Tour, observer::StepEmitter,
};

use super::TourSolver;

/// Grows the tour by the globally cheapest edge leaving the visited set.
///
/// Every visited node is a candidate source, not only the last one added,
/// and the walk is recorded in the order nodes were reached. Ties go to the
/// edge that comes first in [`Graph::edges`].
#[derive(Clone, Copy, Debug, Default)]
pub struct NearestNeighborSolver;

impl NearestNeighborSolver {
    pub fn new() -> Self {
        Self
    }
}

fn cheapest_outgoing(graph: &Graph, visited: &[bool]) -> Option<Edge> {
    let mut chosen: Option<Edge> = None;
    for &edge in graph.edges() {
        let candidate = match (visited[edge.from], visited[edge.to]) {
            (true, false) => edge,
            (false, true) => edge.reversed(),
            _ => continue,
        };
        if chosen.is_none_or(|best| candidate.weight < best.weight) {
            chosen = Some(candidate);
        }
    }
    chosen
}

impl TourSolver for NearestNeighborSolver {
    fn name(&self) -> &'static str {
        "nearest-neighbor"
    }

    fn solve_observed(&mut self, graph: &Graph, observer: &mut dyn StepObserver) -> Result<Tour> {
        let n = graph.node_count();
        if n == 1 {
            return Ok(Tour::trivial());
        }

        let mut visited = vec![false; n];
        visited[Tour::START] = true;
        let mut walk: Vec<NodeId> = Vec::with_capacity(n + 1);
        walk.push(Tour::START);
        let mut emitter = StepEmitter::new(observer);

        while walk.len() < n {
            let Some(edge) = cheapest_outgoing(graph, &visited) else {
                log::warn!(
                    "nearest-neighbor: stuck visited={} total={n}",
                    walk.len()
                );
                return Err(Error::DisconnectedGraph {
                    visited: walk.len(),
                    total: n,
                });
            };
            visited[edge.to] = true;
            walk.push(edge.to);
            emitter.emit(edge);
        }

        let last = walk[walk.len() - 1];
        emitter.emit(graph.edge(last, Tour::START)?);
        walk.push(Tour::START);

        let tour = Tour::from_closed_walk(graph, walk)?;
        log::info!("nearest-neighbor: done n={n} length={}", tour.length());
        Ok(tour)
    }
}

#[cfg(test)]
mod tests {
    use super::NearestNeighborSolver;
    use crate::{Error, Graph, StepRecorder, solver::TourSolver, solver::test_graphs};

    #[test]
    fn square_graph_tour_matches_hand_trace() {
        let graph = test_graphs::square();
        let mut recorder = StepRecorder::new();
        let tour = NearestNeighborSolver::new()
            .solve_observed(&graph, &mut recorder)
            .expect("solve");

        assert_eq!(tour.nodes(), &[0, 1, 2, 3, 0]);
        assert_eq!(tour.length(), 7);
        let totals: Vec<u64> = recorder
            .events()
            .iter()
            .map(|e| e.cumulative_length)
            .collect();
        assert_eq!(totals, vec![1, 3, 4, 7]);
    }

    #[test]
    fn cheapest_edge_may_leave_an_earlier_node() {
        // From {0, 1} the cheapest exit is 0-2, not anything touching 1.
        let graph = Graph::new(
            4,
            [(0, 1, 1), (0, 2, 2), (0, 3, 9), (1, 2, 8), (1, 3, 7), (2, 3, 3)],
        )
        .expect("valid graph");
        let tour = NearestNeighborSolver::new().solve(&graph).expect("solve");
        assert_eq!(tour.nodes(), &[0, 1, 2, 3, 0]);
        // Recorded order is discovery order, so 1-2 is traversed even though
        // 2 was reached from 0.
        assert_eq!(tour.length(), 1 + 8 + 3 + 9);
    }

    #[test]
    fn ties_go_to_first_edge_in_graph_order() {
        let graph = Graph::new(3, [(0, 2, 5), (0, 1, 5), (1, 2, 5)]).expect("valid graph");
        let tour = NearestNeighborSolver::new().solve(&graph).expect("solve");
        assert_eq!(tour.nodes(), &[0, 2, 1, 0]);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let graph = test_graphs::random(12, 4);
        let first = NearestNeighborSolver::new().solve(&graph).expect("solve");
        let second = NearestNeighborSolver::new().solve(&graph).expect("solve");
        assert_eq!(first, second);
    }

    #[test]
    fn disconnected_graph_is_reported() {
        let graph = Graph::new(4, [(0, 1, 1), (2, 3, 1)]).expect("valid graph");
        let err = NearestNeighborSolver::new()
            .solve(&graph)
            .expect_err("unreachable nodes");
        assert!(matches!(
            err,
            Error::DisconnectedGraph {
                visited: 2,
                total: 4
            }
        ));
    }
}
