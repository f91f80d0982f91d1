use std::rc::Rc;

use crate::{
    Edge, Error, FrontierOrder, FrontierQueue, Graph, NodeId, Prioritized, Result, StepEvent,
    StepObserver, Tour, Weight,
};

use super::TourSolver;

const START: NodeId = Tour::START;

#[derive(Clone, Debug)]
struct PartialPath {
    edges: Vec<Edge>,
    visited: Vec<bool>,
    visited_count: usize,
    current: NodeId,
    length: Weight,
}

impl PartialPath {
    fn root(n: usize) -> Self {
        let mut visited = vec![false; n];
        visited[START] = true;
        Self {
            edges: Vec::new(),
            visited,
            visited_count: 1,
            current: START,
            length: 0,
        }
    }

    fn extend(&self, edge: Edge) -> Self {
        let mut next = self.clone();
        next.visited[edge.to] = true;
        next.visited_count += 1;
        next.current = edge.to;
        next.length += edge.weight;
        next.edges.push(edge);
        next
    }

    fn is_complete(&self) -> bool {
        self.visited_count == self.visited.len()
    }

    fn uses(&self, a: NodeId, b: NodeId) -> bool {
        self.edges.iter().any(|e| e.connects(a, b))
    }

    fn nodes(&self) -> Vec<NodeId> {
        let mut nodes = Vec::with_capacity(self.edges.len() + 2);
        nodes.push(START);
        nodes.extend(self.edges.iter().map(|e| e.to));
        nodes
    }
}

/// A path that has not been extended yet, plus the edge that would extend it.
/// Siblings share their parent path.
struct Candidate {
    parent: Rc<PartialPath>,
    edge: Edge,
}

impl Prioritized for Candidate {
    fn last_edge_weight(&self) -> Weight {
        self.edge.weight
    }

    fn path_cost(&self) -> Weight {
        self.parent.length + self.edge.weight
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SearchPhase {
    Ready,
    Searching,
    Done,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SearchStats {
    /// Candidates whose children were pushed.
    pub expanded: usize,
    /// Candidates discarded by the bound.
    pub pruned: usize,
    /// Candidates that reached every node and were closed back to 0.
    pub completed: usize,
    /// Completions that replaced the incumbent.
    pub improvements: usize,
    pub peak_frontier: usize,
}

/// What a single [`ExactSearch::step`] did.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StepOutcome {
    Expanded { children: usize },
    Pruned { bound: Weight },
    Completed { length: Weight, improved: bool },
    Exhausted,
}

struct Incumbent {
    nodes: Vec<NodeId>,
    length: Weight,
}

/// Branch-and-bound over partial paths rooted at node 0.
///
/// The bound adds, for every unvisited node, the cheapest edge touching it
/// that the path has not used. It is a pruning heuristic; results are
/// checked against brute force only on small graphs.
pub struct ExactSearch<'g> {
    graph: &'g Graph,
    frontier: FrontierQueue<Candidate>,
    best: Option<Incumbent>,
    phase: SearchPhase,
    stats: SearchStats,
}

impl<'g> ExactSearch<'g> {
    pub fn new(graph: &'g Graph, order: FrontierOrder) -> Self {
        Self {
            graph,
            frontier: FrontierQueue::new(order),
            best: None,
            phase: SearchPhase::Ready,
            stats: SearchStats::default(),
        }
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            peak_frontier: self.frontier.peak_len(),
            ..self.stats
        }
    }

    /// Length of the best complete tour found so far.
    pub fn best_length(&self) -> Option<Weight> {
        self.best.as_ref().map(|best| best.length)
    }

    fn seed(&mut self) {
        let n = self.graph.node_count();
        if n == 1 {
            self.best = Some(Incumbent {
                nodes: vec![START, START],
                length: 0,
            });
            return;
        }

        let root = Rc::new(PartialPath::root(n));
        self.push_children(&root);
        log::debug!(
            "exact: seeded frontier={} order={}",
            self.frontier.len(),
            self.frontier.order()
        );
    }

    fn push_children(&mut self, parent: &Rc<PartialPath>) -> usize {
        let mut children = 0;
        for &(next, weight) in self.graph.edges_from(parent.current) {
            if parent.visited[next] {
                continue;
            }
            self.frontier.push(Candidate {
                parent: Rc::clone(parent),
                edge: Edge::new(parent.current, next, weight),
            });
            children += 1;
        }
        children
    }

    fn lower_bound(&self, path: &PartialPath) -> Weight {
        let mut bound = path.length;
        for u in self.graph.nodes() {
            if path.visited[u] {
                continue;
            }
            let cheapest = self
                .graph
                .edges_from(u)
                .iter()
                .filter(|&&(v, _)| !path.uses(u, v))
                .map(|&(_, weight)| weight)
                .min();
            bound += cheapest.unwrap_or(0);
        }
        bound
    }

    /// Pops one candidate and processes it.
    pub fn step(&mut self, observer: &mut dyn StepObserver) -> Result<StepOutcome> {
        match self.phase {
            SearchPhase::Ready => {
                self.seed();
                self.phase = SearchPhase::Searching;
            }
            SearchPhase::Searching => {}
            SearchPhase::Done => return Ok(StepOutcome::Exhausted),
        }

        let Some(candidate) = self.frontier.pop_min() else {
            self.phase = SearchPhase::Done;
            return Ok(StepOutcome::Exhausted);
        };

        let path = candidate.parent.extend(candidate.edge);
        observer.on_step(StepEvent {
            edge: candidate.edge,
            cumulative_length: path.length,
        });

        if path.is_complete() {
            return self.complete(path, observer);
        }

        let bound = self.lower_bound(&path);
        if let Some(best) = self.best_length()
            && bound >= best
        {
            self.stats.pruned += 1;
            log::trace!(
                "exact: pruned depth={} bound={bound} best={best}",
                path.edges.len()
            );
            return Ok(StepOutcome::Pruned { bound });
        }

        let children = self.push_children(&Rc::new(path));
        self.stats.expanded += 1;
        Ok(StepOutcome::Expanded { children })
    }

    fn complete(
        &mut self,
        path: PartialPath,
        observer: &mut dyn StepObserver,
    ) -> Result<StepOutcome> {
        let closing = self.graph.edge(path.current, START)?;
        let length = path.length + closing.weight;
        observer.on_step(StepEvent {
            edge: closing,
            cumulative_length: length,
        });
        self.stats.completed += 1;

        let improved = self.best_length().is_none_or(|best| length < best);
        if improved {
            let mut nodes = path.nodes();
            nodes.push(START);
            self.best = Some(Incumbent { nodes, length });
            self.stats.improvements += 1;
            log::debug!(
                "exact: improved best={length} frontier={}",
                self.frontier.len()
            );
        }
        Ok(StepOutcome::Completed { length, improved })
    }

    /// Runs until the frontier is empty.
    pub fn run(&mut self, observer: &mut dyn StepObserver) -> Result<()> {
        while self.step(observer)? != StepOutcome::Exhausted {}
        Ok(())
    }

    /// Converts the incumbent into a [`Tour`].
    pub fn finish(self) -> Result<Tour> {
        let best = self.best.ok_or(Error::NoTourFound)?;
        Tour::from_closed_walk(self.graph, best.nodes)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ExactSearchSolver {
    order: FrontierOrder,
    last_stats: Option<SearchStats>,
}

impl ExactSearchSolver {
    pub fn new(order: FrontierOrder) -> Self {
        Self {
            order,
            last_stats: None,
        }
    }

    /// Counters from the most recent solve.
    pub fn last_stats(&self) -> Option<SearchStats> {
        self.last_stats
    }
}

impl TourSolver for ExactSearchSolver {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn solve_observed(&mut self, graph: &Graph, observer: &mut dyn StepObserver) -> Result<Tour> {
        if graph.node_count() == 1 {
            return Ok(Tour::trivial());
        }

        log::info!(
            "exact: start n={} order={}",
            graph.node_count(),
            self.order
        );
        let mut search = ExactSearch::new(graph, self.order);
        search.run(observer)?;

        let stats = search.stats();
        self.last_stats = Some(stats);
        log::info!(
            "exact: done expanded={} pruned={} completed={} improvements={} peak_frontier={}",
            stats.expanded,
            stats.pruned,
            stats.completed,
            stats.improvements,
            stats.peak_frontier
        );
        search.finish()
    }
}
