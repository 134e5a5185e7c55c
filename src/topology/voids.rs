//! Voids: zero-area triangles that encode hanging nodes.
//!
//! A void `[west, east, pivot]` sits between a coarse triangle owning the
//! edge `west–east` and the finer triangles that share the pivot, which lies
//! at the midpoint of that edge.

use crate::config::VOID_TOL;
use crate::geometry::metrics::is_midpoint;
use crate::topology::trimesh::TriMesh;

/// One void of a mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Void {
    pub trinum: usize,
    pub west: usize,
    pub east: usize,
    pub pivot: usize,
}

/// Voids of `mesh`, in triangle order, under the given tolerance.
pub fn find_voids(mesh: &TriMesh, tol: f64) -> Vec<Void> {
    let points = mesh.points();
    mesh.triangs()
        .iter()
        .enumerate()
        .filter(|(_, t)| is_midpoint(points[t[0]], points[t[1]], points[t[2]], tol))
        .map(|(trinum, t)| Void {
            trinum,
            west: t[0],
            east: t[1],
            pivot: t[2],
        })
        .collect()
}

impl TriMesh {
    /// Triangle numbers of the voids.
    pub fn getvoids(&self) -> Vec<usize> {
        find_voids(self, VOID_TOL).into_iter().map(|v| v.trinum).collect()
    }

    pub fn voids(&self) -> Vec<Void> {
        find_voids(self, VOID_TOL)
    }

    pub fn hasvoids(&self) -> bool {
        let points = self.points();
        self.triangs()
            .iter()
            .any(|t| is_midpoint(points[t[0]], points[t[1]], points[t[2]], VOID_TOL))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point2;

    #[test]
    fn detects_midpoint_apex_only() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.5, 0.0),
            Point2::new(0.5, 1.0),
        ];
        let mesh = TriMesh::from_data(points, vec![[0, 1, 3], [1, 0, 2]]).unwrap();
        assert_eq!(mesh.getvoids(), vec![1]);
        assert_eq!(
            mesh.voids()[0],
            Void {
                trinum: 1,
                west: 1,
                east: 0,
                pivot: 2
            }
        );
    }
}
