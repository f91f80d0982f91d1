use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{Error, Graph, NodeId, Result, SolverOptions, Weight, generator};

pub(crate) const CSV_HEADER: [&str; 3] = ["Node1", "Node2", "Weight"];

/// One row of the edge-list CSV.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub(crate) struct EdgeRecord {
    #[serde(rename = "Node1")]
    pub(crate) node1: NodeId,
    #[serde(rename = "Node2")]
    pub(crate) node2: NodeId,
    #[serde(rename = "Weight")]
    pub(crate) weight: Weight,
}

/// Parses an edge list with the header `Node1,Node2,Weight`. The node
/// count is one more than the largest node id seen.
pub fn read_graph_csv<R: Read>(reader: R) -> Result<Graph> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?;
    if headers.iter().ne(CSV_HEADER) {
        return Err(Error::invalid_input(format!(
            "expected CSV header {}, got {}",
            CSV_HEADER.join(","),
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let mut edges = Vec::new();
    let mut max_node = 0;
    for (idx, row) in rdr.deserialize::<EdgeRecord>().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        let record = row.map_err(|e| Error::invalid_input(format!("line {line}: {e}")))?;
        max_node = max_node.max(record.node1).max(record.node2);
        edges.push((record.node1, record.node2, record.weight));
    }

    if edges.is_empty() {
        return Err(Error::invalid_input("CSV contains no edges"));
    }
    // Every node needs an incident edge, so ids past 2 * rows leave gaps.
    if max_node >= 2 * edges.len() {
        return Err(Error::invalid_input(format!(
            "node id {max_node} is too large for {} edges; ids must be dense from 0",
            edges.len()
        )));
    }

    log::debug!("input: parsed edges={} n={}", edges.len(), max_node + 1);
    Graph::new(max_node + 1, edges)
}

/// Reads from `path`, or from stdin when `path` is `None`.
pub fn read_graph_from_path(path: Option<&Path>) -> Result<Graph> {
    match path {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                Error::invalid_input(format!("failed to open {}: {e}", path.display()))
            })?;
            read_graph_csv(BufReader::new(file))
        }
        None => read_graph_csv(io::stdin().lock()),
    }
}

/// Generates a graph when `--nodes` is set, otherwise reads the CSV input.
pub fn load_graph(options: &SolverOptions) -> Result<Graph> {
    if options.nodes == 0 {
        return read_graph_from_path(options.input_path());
    }

    let seed = options.seed.unwrap_or_else(rand::random);
    log::info!(
        "input: generating n={} max_weight={} seed={seed}",
        options.nodes,
        options.max_weight
    );
    generator::complete_graph(options.nodes, options.max_weight, seed)
}
