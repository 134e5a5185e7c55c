//! Build a CSR (compressed-sparse-row) *dual graph* of a triangle mesh.
//
// Each *triangle* is a vertex; an undirected edge joins two triangles that
// share an internal edge (see `EdgesMap`).
//
// * `xadj[i] .. xadj[i+1]`   = neighbour list of triangle *i*
// * `adjncy`                 = concatenated neighbour vertices
//
// Neighbour lists are sorted ascending, so breadth-first orders are
// deterministic.

use std::collections::VecDeque;

use crate::topology::edges_map::EdgesMap;
use crate::topology::trimesh::TriMesh;

/// CSR triple
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DualGraph {
    pub xadj: Vec<usize>,
    pub adjncy: Vec<usize>,
}

impl DualGraph {
    /// Dual graph over `nvertices` vertices from the internal edges of a mesh.
    pub fn from_edges(nvertices: usize, edges: &EdgesMap) -> Self {
        let mut adj: Vec<Vec<usize>> = vec![Vec::new(); nvertices];
        for e in edges.iter() {
            if e.trinum1 != e.trinum2 {
                adj[e.trinum1].push(e.trinum2);
                adj[e.trinum2].push(e.trinum1);
            }
        }
        let mut xadj = Vec::with_capacity(nvertices + 1);
        let mut adjncy = Vec::new();
        xadj.push(0);
        for mut nbrs in adj {
            nbrs.sort_unstable();
            nbrs.dedup();
            adjncy.extend(nbrs);
            xadj.push(adjncy.len());
        }
        Self { xadj, adjncy }
    }

    pub fn from_mesh(mesh: &TriMesh) -> Self {
        Self::from_edges(mesh.ntriangs(), &mesh.edgesmap())
    }

    pub fn nvertices(&self) -> usize {
        self.xadj.len().saturating_sub(1)
    }

    #[inline]
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adjncy[self.xadj[v]..self.xadj[v + 1]]
    }

    /// Vertices reachable from `seed`, in breadth-first order.
    ///
    /// Returns an empty order when `seed` is out of range.
    pub fn bfs_order(&self, seed: usize) -> Vec<usize> {
        let n = self.nvertices();
        if seed >= n {
            return Vec::new();
        }
        let mut seen = vec![false; n];
        let mut order = Vec::new();
        let mut queue = VecDeque::from([seed]);
        seen[seed] = true;
        while let Some(v) = queue.pop_front() {
            order.push(v);
            for &w in self.neighbors(v) {
                if !seen[w] {
                    seen[w] = true;
                    queue.push_back(w);
                }
            }
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point2;

    #[test]
    fn strip_of_three_triangles() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 1.0),
        ];
        let mesh =
            TriMesh::from_data(points, vec![[1, 4, 3], [0, 1, 2], [1, 3, 2]]).unwrap();
        let g = DualGraph::from_mesh(&mesh);
        assert_eq!(g.xadj, vec![0, 1, 2, 4]);
        assert_eq!(g.neighbors(2), &[0, 1]);
        assert_eq!(g.bfs_order(1), vec![1, 2, 0]);
        assert!(g.bfs_order(5).is_empty());
    }
}
