//! Splitting a mesh into its edge-connected parts.

use crate::algs::dual_graph::DualGraph;
use crate::topology::trimesh::TriMesh;

impl TriMesh {
    /// Edge-connected parts of the mesh once its voids are removed.
    ///
    /// Voids are the only links between refinement levels, so every part
    /// is uniformly refined. Each part lists its triangles breadth-first
    /// from its first triangle and keeps the whole point array.
    pub fn split(&self) -> Vec<TriMesh> {
        let mut rest = self.deltriangs(&self.getvoids());
        let mut parts = Vec::new();
        while !rest.is_empty() {
            let order = DualGraph::from_mesh(&rest).bfs_order(0);
            parts.push(rest.submesh(&order));
            rest = rest.deltriangs(&order);
        }
        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point2;

    #[test]
    fn two_squares_touching_at_a_corner() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
            Point2::new(2.0, 1.0),
            Point2::new(2.0, 2.0),
            Point2::new(1.0, 2.0),
        ];
        let mesh = TriMesh::from_data(
            points,
            vec![[0, 1, 2], [2, 4, 5], [2, 3, 0], [5, 6, 2]],
        )
        .unwrap();
        let parts = mesh.split();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].triangs(), &[[0, 1, 2], [2, 3, 0]]);
        assert_eq!(parts[1].triangs(), &[[2, 4, 5], [5, 6, 2]]);
        assert_eq!(parts[1].npoints(), 7);
        assert!(TriMesh::default().split().is_empty());
    }
}
