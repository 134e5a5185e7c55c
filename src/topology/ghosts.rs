//! Ghost nodes: points no triangle references.

use crate::geometry::Point2;
use crate::topology::trimesh::{Triangle, TriMesh};

/// Result of [`TriMesh::delghosts`].
#[derive(Clone, Debug)]
pub struct GhostsCleaned {
    /// Mesh with every unreferenced point removed.
    pub mesh: TriMesh,
    /// `old_nodes[new] = old`: node numbers in the source mesh.
    pub old_nodes: Vec<usize>,
}

impl TriMesh {
    /// Node numbers of the points no triangle references.
    pub fn getghosts(&self) -> Vec<usize> {
        let mut used = vec![false; self.npoints()];
        for &n in self.triangs().iter().flatten() {
            used[n] = true;
        }
        used.iter()
            .enumerate()
            .filter_map(|(n, &u)| (!u).then_some(n))
            .collect()
    }

    pub fn hasghosts(&self) -> bool {
        self.nnodes() < self.npoints()
    }

    /// Drop ghost points and renumber the remaining nodes in ascending order.
    pub fn delghosts(&self) -> GhostsCleaned {
        let old_nodes = self.nodes_range();
        let mut new_of = vec![usize::MAX; self.npoints()];
        for (new, &old) in old_nodes.iter().enumerate() {
            new_of[old] = new;
        }
        let points: Vec<Point2> = old_nodes.iter().map(|&n| self.point(n)).collect();
        let triangs: Vec<Triangle> = self
            .triangs()
            .iter()
            .map(|tri| tri.map(|n| new_of[n]))
            .collect();
        GhostsCleaned {
            mesh: TriMesh::from_parts(points, triangs),
            old_nodes,
        }
    }
}
