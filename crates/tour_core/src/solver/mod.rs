//! Tour-construction algorithms.
//!
//! Every solver starts and ends its tour at node 0, reports each edge it
//! commits to through a [`StepObserver`], and returns the finished
//! [`Tour`] or an error; no partial result survives a failure.

mod brute_force;
mod edge_elimination;
mod exact;
mod nearest_neighbor;

use rand::{SeedableRng, rngs::StdRng};
use tour_derive::CliValue;

pub use brute_force::{BruteForceSolver, MAX_BRUTE_FORCE_NODES};
pub use edge_elimination::EdgeEliminationSolver;
pub use exact::{ExactSearch, ExactSearchSolver, SearchPhase, SearchStats, StepOutcome};
pub use nearest_neighbor::NearestNeighborSolver;

use crate::{Graph, NoopObserver, Result, SolverOptions, StepObserver, Tour};

pub trait TourSolver {
    /// Short label used in log lines.
    fn name(&self) -> &'static str;

    fn solve_observed(&mut self, graph: &Graph, observer: &mut dyn StepObserver) -> Result<Tour>;

    fn solve(&mut self, graph: &Graph) -> Result<Tour> {
        self.solve_observed(graph, &mut NoopObserver)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, CliValue)]
#[cli_value(option = "algorithm")]
pub enum Algorithm {
    /// Branch-and-bound over partial paths.
    Exact,
    #[default]
    #[cli(alias = "nn", alias = "greedy")]
    NearestNeighbor,
    #[cli(alias = "greedy-drop")]
    EdgeElimination,
    /// Enumerates every cycle; small graphs only.
    BruteForce,
}

/// Builds the solver selected by `options`.
pub fn build_solver(options: &SolverOptions) -> Box<dyn TourSolver> {
    match options.algorithm {
        Algorithm::Exact => Box::new(ExactSearchSolver::new(options.frontier_order)),
        Algorithm::NearestNeighbor => Box::new(NearestNeighborSolver::new()),
        Algorithm::EdgeElimination => {
            let rng = match options.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            Box::new(EdgeEliminationSolver::new(rng))
        }
        Algorithm::BruteForce => Box::new(BruteForceSolver::new()),
    }
}

#[cfg(test)]
pub(crate) mod test_graphs {
    use crate::{Graph, generator};

    /// Four nodes where nearest neighbor and the optimum agree at length 7.
    pub(crate) fn square() -> Graph {
        Graph::new(
            4,
            [(0, 1, 1), (0, 2, 4), (0, 3, 3), (1, 2, 2), (1, 3, 5), (2, 3, 1)],
        )
        .expect("valid graph")
    }

    /// Complete graph whose edge weights are distinct powers of two, so
    /// distinct cycles always have distinct lengths.
    pub(crate) fn powers_of_two(n: usize) -> Graph {
        let mut edges = Vec::new();
        for u in 0..n {
            for v in (u + 1)..n {
                edges.push((u, v, 1u64 << edges.len()));
            }
        }
        Graph::new(n, edges).expect("valid graph")
    }

    pub(crate) fn random(n: usize, seed: u64) -> Graph {
        generator::complete_graph(n, 50, seed).expect("generated graph")
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Algorithm, BruteForceSolver, EdgeEliminationSolver, ExactSearchSolver,
        NearestNeighborSolver, TourSolver, build_solver, test_graphs,
    };
    use crate::{FrontierOrder, Graph, SolverOptions, Tour};

    fn all_solvers() -> Vec<Box<dyn TourSolver>> {
        vec![
            Box::new(ExactSearchSolver::new(FrontierOrder::EdgeWeight)),
            Box::new(ExactSearchSolver::new(FrontierOrder::PathCost)),
            Box::new(NearestNeighborSolver::new()),
            Box::new(EdgeEliminationSolver::from_seed(3)),
            Box::new(BruteForceSolver::new()),
        ]
    }

    #[test]
    fn every_solver_returns_a_verified_tour() {
        for n in 3..=7 {
            for seed in 0..3 {
                let graph = test_graphs::random(n, seed);
                for mut solver in all_solvers() {
                    let tour = solver.solve(&graph).expect("solve");
                    let recomputed = tour.verify(&graph).expect("tour invariants");
                    assert_eq!(recomputed, tour.length(), "{} n={n}", solver.name());
                    assert_eq!(tour.nodes().len(), n + 1);
                }
            }
        }
    }

    #[test]
    fn every_solver_returns_trivial_tour_for_single_node() {
        let graph = Graph::new(1, []).expect("valid graph");
        for mut solver in all_solvers() {
            let tour = solver.solve(&graph).expect("solve");
            assert_eq!(tour, Tour::trivial(), "{}", solver.name());
            assert_eq!(tour.nodes(), &[0, 0]);
            assert_eq!(tour.length(), 0);
        }
    }

    #[test]
    fn every_solver_handles_two_nodes() {
        let graph = Graph::new(2, [(0, 1, 6)]).expect("valid graph");
        for mut solver in all_solvers() {
            let tour = solver.solve(&graph).expect("solve");
            assert_eq!(tour.nodes(), &[0, 1, 0], "{}", solver.name());
            assert_eq!(tour.length(), 12);
        }
    }

    // The pruning bound is a heuristic, so this is a sanity bound rather
    // than an optimality proof.
    #[test]
    fn exact_search_never_loses_to_nearest_neighbor() {
        for seed in 0..8 {
            let graph = test_graphs::random(7, seed);
            let greedy = NearestNeighborSolver::new().solve(&graph).expect("greedy");
            for order in [FrontierOrder::EdgeWeight, FrontierOrder::PathCost] {
                let exact = ExactSearchSolver::new(order).solve(&graph).expect("exact");
                assert!(
                    exact.length() <= greedy.length(),
                    "seed={seed} order={order} exact={} greedy={}",
                    exact.length(),
                    greedy.length()
                );
            }
        }
    }

    #[test]
    fn exact_search_agrees_with_brute_force_on_small_graphs() {
        for seed in 0..6 {
            let graph = test_graphs::random(6, seed);
            let optimum = BruteForceSolver::new().solve(&graph).expect("brute force");
            let exact = ExactSearchSolver::default().solve(&graph).expect("exact");
            assert_eq!(exact.length(), optimum.length(), "seed={seed}");
        }
    }

    #[test]
    fn build_solver_follows_algorithm_option() {
        let cases = [
            (Algorithm::Exact, "exact"),
            (Algorithm::NearestNeighbor, "nearest-neighbor"),
            (Algorithm::EdgeElimination, "edge-elimination"),
            (Algorithm::BruteForce, "brute-force"),
        ];
        for (algorithm, name) in cases {
            let options = SolverOptions {
                algorithm,
                seed: Some(1),
                ..SolverOptions::default()
            };
            assert_eq!(build_solver(&options).name(), name);
        }
    }

    #[test]
    fn seeded_edge_elimination_from_options_is_reproducible() {
        let graph = test_graphs::powers_of_two(6);
        let options = SolverOptions {
            algorithm: Algorithm::EdgeElimination,
            seed: Some(99),
            ..SolverOptions::default()
        };
        let first = build_solver(&options).solve(&graph).expect("solve");
        let second = build_solver(&options).solve(&graph).expect("solve");
        assert_eq!(first, second);
    }

    #[test]
    fn algorithm_parses_aliases() {
        assert_eq!(Algorithm::parse("nn").expect("parse"), Algorithm::NearestNeighbor);
        assert_eq!(
            Algorithm::parse("greedy-drop").expect("parse"),
            Algorithm::EdgeElimination
        );
        assert_eq!(Algorithm::parse("Exact").expect("parse"), Algorithm::Exact);
        let err = Algorithm::parse("annealing").expect_err("unknown algorithm");
        assert!(err.to_string().contains("Invalid value for --algorithm"));
    }
}
