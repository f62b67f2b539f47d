use derive_more::Display;

/// Result alias used by every partitioning entry point.
pub type Result<T> = std::result::Result<T, PartitionError>;

/// Errors raised while validating the arguments of a partitioning call.
/// Once validation passes, the algorithms themselves never fail.
#[derive(Debug, Display, Clone, PartialEq)]
pub enum PartitionError {
    /// The graph has no vertex where a partition was requested.
    #[display(fmt = "graph is empty")]
    EmptyGraph,

    /// The requested part count cannot be produced from the graph.
    #[display(fmt = "invalid k: {} (graph order {}, k must be in 2..={})", k, order, order)]
    InvalidArgument { k: usize, order: usize },

    /// A required graph reference is absent.
    #[display(fmt = "input graph is nil")]
    NilInput,

    /// A vertex named by the caller does not belong to the graph.
    #[display(fmt = "vertex not found: {}", _0)]
    VertexNotFound(String),

    /// A cut was requested between a vertex and itself.
    #[display(fmt = "source and sink must differ: {}", _0)]
    SameTerminal(String),

    /// The host graph already holds an edge between the two vertices.
    #[display(fmt = "edge already exists: {}", _0)]
    EdgeAlreadyExists(String),

    /// A configuration value is out of range.
    #[display(fmt = "invalid configuration: {}", _0)]
    Config(String),
}

impl std::error::Error for PartitionError {}

#[cfg(test)]
mod test_error {
    use crate::error::PartitionError;

    #[test]
    fn test_display() {
        let err = PartitionError::InvalidArgument { k: 5, order: 3 };
        assert_eq!(err.to_string(), "invalid k: 5 (graph order 3, k must be in 2..=3)");
        assert_eq!(PartitionError::EmptyGraph.to_string(), "graph is empty");
        assert_eq!(
            PartitionError::VertexNotFound("\"A\"".to_string()).to_string(),
            "vertex not found: \"A\""
        );
    }

    #[test]
    fn test_into_anyhow() {
        let res: anyhow::Result<()> = Err(PartitionError::NilInput.into());
        assert_eq!(res.unwrap_err().to_string(), "input graph is nil");
    }
}
