//! Graph and search algorithms over triangle meshes.

pub mod dual_graph;
pub mod glue;
pub mod inspect;

pub use dual_graph::DualGraph;
pub use glue::{join_meshes, join_meshes_with};
pub use inspect::{find_masked, find_node, find_subset};
