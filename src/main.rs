use std::time::Instant;

use log::info;

use tour_core::{
    LoggingObserver, Result, SolverOptions, build_solver, export_graph, load_graph, logging,
    write_tour_to_path,
};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = SolverOptions::from_args()?;
    logging::init_logger(&options)?;
    info!("options: {options}");

    let graph = load_graph(&options)?;
    info!(
        "input: n={} edges={} complete={}",
        graph.node_count(),
        graph.edge_count(),
        graph.is_complete()
    );
    if let Some(path) = options.export_path() {
        export_graph(path, &graph)?;
    }

    let mut solver = build_solver(&options);
    let tour = if options.trace_steps {
        let mut observer = LoggingObserver::new(solver.name());
        solver.solve_observed(&graph, &mut observer)?
    } else {
        solver.solve(&graph)?
    };

    write_tour_to_path(options.output_path(), &tour)?;

    info!(
        "output: algorithm={} n={} length={} time={:.2}s",
        solver.name(),
        graph.node_count(),
        tour.length(),
        now.elapsed().as_secs_f32()
    );
    tour.metrics();

    Ok(())
}
