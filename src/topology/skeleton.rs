//! Hanging-node skeleton: the four triangles around every void pivot.
//!
//! In a 1-irregular mesh each pivot is shared by exactly four triangles:
//! the void itself and three finer triangles. Walking counter-clockwise from
//! the void gives `east` (shares `pivot–east`), then `core` (opposite the
//! void) and finally `west` (shares `pivot–west`).

use crate::mesh_error::AmrError;
use crate::topology::nodes_map::{NodeEntry, NodesMap};
use crate::topology::trimesh::TriMesh;
use crate::topology::voids::{Void, find_voids};

/// Triangles around one pivot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PivotFan {
    pub pivot: usize,
    pub void: usize,
    pub east: usize,
    pub core: usize,
    pub west: usize,
}

/// Pivot fans of a mesh, sorted by pivot.
#[derive(Clone, Debug, Default)]
pub struct MeshSkeleton {
    fans: Vec<PivotFan>,
}

impl MeshSkeleton {
    /// Build the skeleton, failing when a pivot is not shared by exactly four
    /// triangles or hangs more than one void.
    pub fn from_mesh(mesh: &TriMesh, tol: f64) -> Result<Self, AmrError> {
        let mut voids = find_voids(mesh, tol);
        voids.sort_by_key(|v| v.pivot);
        if let Some(w) = voids.windows(2).find(|w| w[0].pivot == w[1].pivot) {
            return Err(AmrError::DuplicatePivot(w[0].pivot));
        }
        let nodes = mesh.nodesmap();
        let fans = voids
            .iter()
            .map(|v| fan_of(&nodes, v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { fans })
    }

    pub fn fans(&self) -> &[PivotFan] {
        &self.fans
    }

    pub fn size(&self) -> usize {
        self.fans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fans.is_empty()
    }

    pub fn pivots(&self) -> Vec<usize> {
        self.fans.iter().map(|f| f.pivot).collect()
    }

    pub fn voids(&self) -> Vec<usize> {
        self.fans.iter().map(|f| f.void).collect()
    }

    pub fn cores(&self) -> Vec<usize> {
        self.fans.iter().map(|f| f.core).collect()
    }

    pub fn wests(&self) -> Vec<usize> {
        self.fans.iter().map(|f| f.west).collect()
    }

    pub fn easts(&self) -> Vec<usize> {
        self.fans.iter().map(|f| f.east).collect()
    }
}

fn fan_of(nodes: &NodesMap, void: &Void) -> Result<PivotFan, AmrError> {
    let occ = nodes.occurrences(void.pivot);
    let bad_rank = AmrError::PivotRank {
        pivot: void.pivot,
        rank: occ.len(),
    };
    if occ.len() != 4 {
        return Err(bad_rank);
    }
    let succ = |e: &NodeEntry| occ.iter().find(|f| f.nodnum1 == e.nodnum2).copied();
    let start = occ
        .iter()
        .find(|e| e.trinum == void.trinum)
        .copied()
        .ok_or_else(|| bad_rank.clone())?;
    let east = succ(&start).ok_or_else(|| bad_rank.clone())?;
    let core = succ(&east).ok_or_else(|| bad_rank.clone())?;
    let west = succ(&core).ok_or_else(|| bad_rank.clone())?;
    if west.nodnum2 != start.nodnum1 {
        return Err(bad_rank);
    }
    Ok(PivotFan {
        pivot: void.pivot,
        void: void.trinum,
        east: east.trinum,
        core: core.trinum,
        west: west.trinum,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VOID_TOL;
    use crate::geometry::Point2;

    /// Unit square split by its diagonal; the lower-right half is refined.
    fn half_refined_square() -> TriMesh {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.5, 0.5),
            Point2::new(0.5, 0.0),
            Point2::new(1.0, 0.5),
        ];
        let triangs = vec![
            [2, 3, 0],
            [5, 6, 4],
            [5, 1, 6],
            [6, 2, 4],
            [4, 0, 5],
            [2, 0, 4],
        ];
        TriMesh::from_data(points, triangs).unwrap()
    }

    #[test]
    fn fan_around_pivot() {
        let skeleton = MeshSkeleton::from_mesh(&half_refined_square(), VOID_TOL).unwrap();
        assert_eq!(
            skeleton.fans(),
            &[PivotFan {
                pivot: 4,
                void: 5,
                east: 4,
                core: 1,
                west: 3,
            }]
        );
    }

    #[test]
    fn missing_fine_triangle_is_reported() {
        let mesh = half_refined_square().deltriangs(&[1]);
        let err = MeshSkeleton::from_mesh(&mesh, VOID_TOL).unwrap_err();
        assert_eq!(err, AmrError::PivotRank { pivot: 4, rank: 3 });
    }
}
