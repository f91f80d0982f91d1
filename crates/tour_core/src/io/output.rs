use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::{Error, Graph, Result, Tour, io::input::EdgeRecord};

/// Writes the tour as two lines: the node sequence and the total length.
pub fn write_tour<W: Write>(mut writer: W, tour: &Tour) -> Result<()> {
    writeln!(writer, "tour: {tour}")?;
    writeln!(writer, "length: {}", tour.length())?;
    writer.flush()?;
    Ok(())
}

/// Writes to `path`, or to stdout when `path` is `None`.
pub fn write_tour_to_path(path: Option<&Path>, tour: &Tour) -> Result<()> {
    match path {
        Some(path) => write_tour(BufWriter::new(create(path)?), tour),
        None => write_tour(io::stdout().lock(), tour),
    }
}

/// Writes every edge of `graph` in the same CSV layout the reader accepts.
pub fn write_graph_csv<W: Write>(writer: W, graph: &Graph) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for edge in graph.edges() {
        wtr.serialize(EdgeRecord {
            node1: edge.from,
            node2: edge.to,
            weight: edge.weight,
        })?;
    }
    // serialize() only emits the header alongside the first record.
    if graph.edge_count() == 0 {
        wtr.write_record(crate::io::input::CSV_HEADER)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_graph(path: &Path, graph: &Graph) -> Result<()> {
    write_graph_csv(BufWriter::new(create(path)?), graph)?;
    log::info!(
        "output: exported edges={} path={}",
        graph.edge_count(),
        path.display()
    );
    Ok(())
}

fn create(path: &Path) -> Result<File> {
    File::create(path)
        .map_err(|e| Error::other(format!("failed to create {}: {e}", path.display())))
}
