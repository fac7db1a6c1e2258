/// Error type for the few fallible operations of the core
use std::fmt;

/// Errors raised while validating meshes or loading configuration
#[derive(Debug)]
pub enum Error {
    /// An edge references a vertex index outside the mesh
    EdgeOutOfBounds {
        edge: usize,
        index: usize,
        vertex_count: usize,
    },
    /// Configuration could not be parsed
    Config(serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EdgeOutOfBounds {
                edge,
                index,
                vertex_count,
            } => write!(
                f,
                "edge {} references vertex {} but the mesh has {} vertices",
                edge, index, vertex_count
            ),
            Error::Config(e) => write!(f, "invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e)
    }
}
