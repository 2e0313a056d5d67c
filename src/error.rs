//! Error types for diagram construction and edge clipping.

use thiserror::Error;

use crate::diagram::{CellId, EdgeId, SourceCategory, VertexId};

/// Errors returned by a [`DiagramBuilder`](crate::diagram::DiagramBuilder) that refuses its input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// Segment sites were passed. Only point sites are supported.
    #[error("segment sites are not supported (got {0})")]
    SegmentsUnsupported(usize),

    /// A site has a NaN or infinite coordinate.
    #[error("site {index} is not finite: ({x}, {y})")]
    NonFiniteSite { index: usize, x: f64, y: f64 },

    /// The sweep reached a state its invariants rule out.
    #[error("sweep invariant broken: {0}")]
    SweepFailed(&'static str),
}

/// Internal-consistency violations found while walking a diagram.
///
/// A correct builder never produces these from point-only input. They abort the paint pass that
/// hit them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopologyError {
    #[error("edge {0:?} is not in the diagram")]
    UnknownEdge(EdgeId),

    #[error("cell {0:?} is not in the diagram")]
    UnknownCell(CellId),

    #[error("vertex {0:?} is not in the diagram")]
    UnknownVertex(VertexId),

    #[error("edge {0:?} has no twin")]
    MissingTwin(EdgeId),

    #[error("cell {cell:?} is sourced from a {category:?}, not a single point")]
    NotPointSite {
        cell: CellId,
        category: SourceCategory,
    },

    #[error("cell {cell:?} refers to site {index}, but only {len} sites exist")]
    SiteOutOfRange { cell: CellId, index: usize, len: usize },

    #[error("edge {0:?} separates two coincident sites")]
    CoincidentSites(EdgeId),
}
