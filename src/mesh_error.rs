//! AmrError: Unified error type for trimesh-amr public APIs
//!
//! Every fallible operation of the crate returns `Result<_, AmrError>`.
//! Absence that is part of normal operation (no void, no compact cluster,
//! no coarsenable target) is reported with `Option` or empty values instead.

use thiserror::Error;

/// Unified error type for mesh adaptation operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AmrError {
    /// A triangle references a node outside the point array.
    #[error("Mesh error: triangle {trinum} references node {node} but the mesh has {npoints} points")]
    NodeOutOfRange {
        trinum: usize,
        node: usize,
        npoints: usize,
    },
    /// A triangle lists the same node twice.
    #[error("Mesh error: triangle {0} repeats a node")]
    DegenerateTriangle(usize),
    /// The operation needs a mesh where every point is referenced.
    #[error("Mesh error: {0} points are not referenced by any triangle")]
    GhostNodes(usize),
    /// Boundary edges share a start node, so the boundary cannot be split into loops.
    #[error("Boundary error: cannot split the edge, self-intersection at node {0}")]
    BoundaryIntersection(usize),
    /// A boundary walk did not return to its start node.
    #[error("Boundary error: loop starting at node {0} is not closed")]
    OpenBoundary(usize),
    /// `synctonode` was asked for a node that is not on the loop.
    #[error("Boundary error: node {0} is not on the edge loop")]
    NodeNotOnLoop(usize),
    /// `atnode` was asked for a node that no triangle references.
    #[error("Nodes map error: node {0} is not in the map")]
    NodeNotInMap(usize),
    /// A void pivot is shared by an unexpected number of triangles.
    #[error("Skeleton error: pivot {pivot} has rank {rank}, expected 4")]
    PivotRank { pivot: usize, rank: usize },
    /// Two voids hang on the same pivot node.
    #[error("Skeleton error: node {0} is the pivot of more than one void")]
    DuplicatePivot(usize),
    /// Hanging-node constraints refer back to themselves.
    #[error("Constraint error: cycle through pivot {0}")]
    ConstraintCycle(usize),
    /// Coarsening the requested cluster would leave a pivot with rank other than 4.
    #[error("Coarsen error: non-meshable cluster, pivot {pivot} would have rank {rank}")]
    NonMeshableCluster { pivot: usize, rank: usize },
    /// A node field does not match the number of mesh points.
    #[error("Data error: expected {expected} values, found {found}")]
    DataLengthMismatch { expected: usize, found: usize },
    /// The requested data field does not exist on the unit.
    #[error("Data error: unknown field `{0}`")]
    UnknownField(String),
    /// The constrained mass system could not be factorised.
    #[error("Solver error: {0}")]
    Factorization(String),
    /// Configuration value out of range.
    #[error("Config error: {0}")]
    InvalidConfig(String),
    /// Unknown structured grid layout name.
    #[error("Grid error: unknown grid kind `{0}`")]
    UnknownGridKind(String),
    /// Reading or writing an archive failed.
    #[error("I/O error: {0}")]
    Io(String),
    /// An archive could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for AmrError {
    fn from(err: std::io::Error) -> Self {
        AmrError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AmrError {
    fn from(err: serde_json::Error) -> Self {
        AmrError::Serialization(err.to_string())
    }
}
