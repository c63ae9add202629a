//! Error types for mesh ingestion and scene setup.

use core::fmt;

/// Errors that can occur while building meshes and bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A `v` line did not contain three parseable coordinates.
    MalformedVertex { line: usize },
    /// An `f` line did not contain four parseable quad indices.
    MalformedFace { line: usize },
    /// A quad face referenced a vertex outside the position list.
    FaceIndexOutOfBounds { index: usize, count: usize },
    /// A constraint referenced a vertex outside this body.
    VertexOutOfBounds { index: usize, count: usize },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::MalformedVertex { line } => {
                write!(f, "malformed vertex on line {}", line)
            }
            SimError::MalformedFace { line } => {
                write!(f, "malformed quad face on line {}", line)
            }
            SimError::FaceIndexOutOfBounds { index, count } => {
                write!(f, "face index {} out of bounds (vertex count: {})", index, count)
            }
            SimError::VertexOutOfBounds { index, count } => {
                write!(f, "vertex index {} out of bounds (count: {})", index, count)
            }
        }
    }
}
