#![cfg_attr(docsrs, feature(doc_cfg))]
//! # trimesh-amr
//!
//! trimesh-amr performs local adaptive refinement and coarsening of planar
//! triangle meshes and carries node-valued data across every change.
//!
//! ## Features
//! - Immutable [`TriMesh`](topology::TriMesh) values with edge, boundary and node index maps
//! - Red refinement of selected triangles with hanging-node *voids*
//! - Supertriangulations and cleaning passes that pick compact clusters to coarsen
//! - Mass-consistent data transport on coarsening (lumped mass, sparse Cholesky)
//! - Adaptive units that keep named node fields in step with their mesh
//! - Structured grid generators, mesh joining and JSON archives
//!
//! ## Voids
//!
//! A void is a degenerate triangle `[west, east, pivot]` whose pivot lies at
//! the midpoint of `west–east`. It records the hanging-node constraint
//! `data[pivot] == 0.5 * (data[west] + data[east])` inside the triangle
//! table itself, so the mesh stays a plain `(points, triangs)` pair.
//!
//! ## Usage
//!
//! ```
//! use trimesh_amr::prelude::*;
//!
//! let mesh = trigrid(3, 3, GridKind::EastSlope);
//! let unit = AmrUnit::new(mesh)
//!     .makedata("u", |x, y| x + 2.0 * y, true)?
//!     .refine(&[0])?;
//! assert!(unit.mesh().hasvoids());
//! # Ok::<(), AmrError>(())
//! ```

pub mod adapt;
pub mod algs;
pub mod config;
pub mod data;
pub mod debug_invariants;
pub mod geometry;
pub mod io;
pub mod mesh_error;
pub mod mesh_generation;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::adapt::{AmrUnit, ElementUnit, FieldMap, TriElement, TriFront};
    pub use crate::algs::{find_masked, find_node, find_subset, join_meshes};
    pub use crate::config::AmrConfig;
    pub use crate::data::{
        DataCollector, DataRefiner, HangingNodeConstraints, LumpedMassProvider,
        MassOperatorProvider, MassOperators, constr_data,
    };
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::Point2;
    pub use crate::mesh_error::AmrError;
    pub use crate::mesh_generation::{GridKind, trigrid};
    pub use crate::topology::coarsen::{CoarsenedMesh, coarsen_mesh, coarsen_mesh_with};
    pub use crate::topology::refine::{RefinedMesh, refine_mesh, refine_mesh_with};
    pub use crate::topology::{
        EdgeLoop, EdgesMap, MeshEdge, MeshSkeleton, NodesMap, SuperTriu, TriMesh, Triangle,
    };
}
