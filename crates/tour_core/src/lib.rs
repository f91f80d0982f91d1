//! Tour construction for the travelling salesman problem on undirected
//! weighted graphs: an exact branch-and-bound search, a nearest-neighbor
//! greedy and a randomized edge-elimination heuristic, all reporting their
//! progress edge by edge.

mod error;
mod frontier;
pub mod generator;
mod graph;
mod io;
pub mod logging;
mod observer;
pub mod solver;
mod tour;

pub(crate) use io::options;

pub use error::{Error, Result};
pub use frontier::{FrontierOrder, FrontierQueue, Prioritized};
pub use graph::{Edge, Graph, NodeId, Weight};
pub use io::input::{load_graph, read_graph_csv, read_graph_from_path};
pub use io::options::{LogFormat, LogLevel, SolverOptions};
pub use io::output::{export_graph, write_graph_csv, write_tour, write_tour_to_path};
pub use observer::{LoggingObserver, NoopObserver, StepEvent, StepObserver, StepRecorder};
pub use solver::{
    Algorithm, BruteForceSolver, EdgeEliminationSolver, ExactSearch, ExactSearchSolver,
    NearestNeighborSolver, SearchStats, TourSolver, build_solver,
};
pub use tour::{Tour, TourMetrics};
