//! Mesh topology: the triangle mesh, its index maps and the refine/coarsen
//! pipelines built on them.
//!
//! - [`trimesh::TriMesh`] and its edit operations
//! - index maps over edges ([`edges_map`], [`mesh_edge`]) and nodes ([`nodes_map`])
//! - hanging-node structure ([`voids`], [`skeleton`]) and supertriangulations
//!   ([`supertriu`])
//! - [`refine`] and [`coarsen`], plus static [`reduce`]tion of supertriangle clusters

pub mod coarsen;
pub mod edges_map;
pub mod ghosts;
pub mod mesh_edge;
pub mod nodes_map;
pub mod pairs;
pub mod reduce;
pub mod refine;
pub mod skeleton;
pub mod split;
pub mod supertriu;
pub mod trimesh;
pub mod voids;

pub use edges_map::{EdgesMap, EdgesSpec, InnerEdge};
pub use mesh_edge::{BoundaryEdge, EdgeLoop, MeshEdge};
pub use nodes_map::{NodeEntry, NodesMap};
pub use skeleton::{MeshSkeleton, PivotFan};
pub use supertriu::{SuperTriangle, SuperTriu};
pub use trimesh::{TriMesh, Triangle};
pub use voids::Void;
