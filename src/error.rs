use core::fmt;

/// Result alias for `coregroups`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the clustering entry points and the evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input graph has no vertices.
    EmptyInput,

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// A partition references a vertex id outside the graph.
    VertexOutOfRange {
        /// Offending vertex id.
        vertex: usize,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },

    /// A vertex appears in more than one cluster.
    DuplicateVertex {
        /// Offending vertex id.
        vertex: usize,
    },

    /// A partition does not cover every vertex of the graph.
    PartitionMismatch {
        /// Vertices in the graph.
        expected: usize,
        /// Vertices covered by the partition.
        found: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::VertexOutOfRange {
                vertex,
                vertex_count,
            } => {
                write!(
                    f,
                    "vertex {vertex} is out of range for a graph of {vertex_count} vertices"
                )
            }
            Error::DuplicateVertex { vertex } => {
                write!(f, "vertex {vertex} appears in more than one cluster")
            }
            Error::PartitionMismatch { expected, found } => {
                write!(f, "partition covers {found} of {expected} vertices")
            }
        }
    }
}

impl std::error::Error for Error {}
