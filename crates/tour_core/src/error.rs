use thiserror::Error as ThisError;

use crate::NodeId;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("invalid graph: {0}")]
    InvalidGraph(String),
    #[error("edge not found between nodes {from} and {to}")]
    EdgeNotFound { from: NodeId, to: NodeId },
    #[error("graph is disconnected: no unvisited node reachable after visiting {visited} of {total} nodes")]
    DisconnectedGraph { visited: usize, total: usize },
    #[error("search exhausted without producing a complete tour")]
    NoTourFound,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_graph(message: impl Into<String>) -> Self {
        Self::InvalidGraph(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    pub fn edge_not_found(from: NodeId, to: NodeId) -> Self {
        Self::EdgeNotFound { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn edge_not_found_names_both_endpoints() {
        let err = Error::edge_not_found(3, 7);
        assert_eq!(err.to_string(), "edge not found between nodes 3 and 7");
    }

    #[test]
    fn disconnected_graph_reports_progress() {
        let err = Error::DisconnectedGraph {
            visited: 2,
            total: 5,
        };
        assert!(err.to_string().contains("after visiting 2 of 5 nodes"));
    }

    #[test]
    fn io_errors_convert_transparently() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "missing.csv");
    }
}
