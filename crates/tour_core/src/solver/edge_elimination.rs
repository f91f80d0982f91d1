use std::collections::HashMap;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{
    Edge, Error, Graph, NodeId, Result, StepObserver, Tour, Weight, observer::StepEmitter,
};

use super::TourSolver;

/// Visits the nodes in a random order, taking each consecutive edge out of
/// a working pool so no edge is used twice.
///
/// The random source is injected; seed it for reproducible tours.
#[derive(Clone, Debug)]
pub struct EdgeEliminationSolver<R = StdRng> {
    rng: R,
}

impl EdgeEliminationSolver<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> EdgeEliminationSolver<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    fn permutation(&mut self, n: usize) -> Vec<NodeId> {
        let mut order: Vec<NodeId> = (0..n).collect();
        order.shuffle(&mut self.rng);
        order
    }
}

impl<R: Rng> TourSolver for EdgeEliminationSolver<R> {
    fn name(&self) -> &'static str {
        "edge-elimination"
    }

    fn solve_observed(&mut self, graph: &Graph, observer: &mut dyn StepObserver) -> Result<Tour> {
        let n = graph.node_count();
        if n == 1 {
            return Ok(Tour::trivial());
        }

        let order = self.permutation(n);
        log::debug!("edge-elimination: order={order:?}");

        let mut pool: HashMap<(NodeId, NodeId), Weight> = graph
            .edges()
            .iter()
            .map(|edge| (edge.key(), edge.weight))
            .collect();
        let mut emitter = StepEmitter::new(observer);

        for pair in order.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let weight = pool
                .remove(&(from.min(to), from.max(to)))
                .ok_or_else(|| Error::edge_not_found(from, to))?;
            emitter.emit(Edge::new(from, to, weight));
        }

        // Looked up in the graph, not the pool: with two nodes the closing
        // edge is the one just taken.
        emitter.emit(graph.edge(order[n - 1], order[0])?);
        log::debug!("edge-elimination: pool_remaining={}", pool.len());

        let tour = Tour::from_cycle(graph, &order)?;
        log::info!("edge-elimination: done n={n} length={}", tour.length());
        Ok(tour)
    }
}
