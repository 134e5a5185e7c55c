//! Supertriangulation: groups of four triangles that undo one refinement.
//!
//! A *core* is a triangle whose three edges are all internal. Together with
//! its three edge neighbours it forms a *supertriangle* whose corners are the
//! neighbours' apexes opposite the shared edges. When the mesh came from a
//! uniform split, the supertriangle is the parent triangle and the core is
//! its centre child.
//!
//! # Row layout
//! Row `i` stores the core, the neighbours across the core's local edges
//! 0, 1, 2 (in that order), and the supertriangle vertices: vertex `k` is the
//! apex of neighbour `k`. For an aligned row with core `[k0, k1, k2]` and
//! vertices `[s0, s1, s2]`:
//! `mid(s0, s1) = k1`, `mid(s1, s2) = k2`, `mid(s2, s0) = k0`.

mod cleaning;

use std::sync::Arc;

use hashbrown::HashSet;

use crate::debug_invariants::DebugInvariants;
use crate::geometry::Point2;
use crate::geometry::metrics;
use crate::mesh_error::AmrError;
use crate::topology::trimesh::{TriMesh, Triangle, in_range};
use crate::topology::voids::find_voids;

/// One supertriangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SuperTriangle {
    pub core: usize,
    pub neighbors: [usize; 3],
    pub vertices: [usize; 3],
}

impl SuperTriangle {
    /// Core followed by its three neighbours.
    #[inline]
    pub fn bodies(&self) -> [usize; 4] {
        [
            self.core,
            self.neighbors[0],
            self.neighbors[1],
            self.neighbors[2],
        ]
    }
}

/// Supertriangles of a background mesh.
#[derive(Clone, Debug)]
pub struct SuperTriu {
    mesh: Arc<TriMesh>,
    rows: Vec<SuperTriangle>,
}

static_assertions::assert_impl_all!(SuperTriu: Send, Sync);

impl SuperTriu {
    /// Every core of `mesh`, in ascending core order.
    pub fn from_mesh(mesh: &TriMesh) -> Self {
        Self::build(Arc::new(mesh.clone()))
    }

    fn build(mesh: Arc<TriMesh>) -> Self {
        // (own local edge, neighbour, neighbour local edge)
        let mut links: Vec<Vec<(usize, usize, usize)>> = vec![Vec::new(); mesh.ntriangs()];
        for e in mesh.edgesmap().iter() {
            links[e.trinum1].push((e.locnum1, e.trinum2, e.locnum2));
            links[e.trinum2].push((e.locnum2, e.trinum1, e.locnum1));
        }
        let triangs = mesh.triangs();
        let rows = links
            .into_iter()
            .enumerate()
            .filter(|(_, l)| l.len() == 3)
            .map(|(core, mut l)| {
                l.sort_by_key(|&(loc, _, _)| loc);
                SuperTriangle {
                    core,
                    neighbors: [l[0].1, l[1].1, l[2].1],
                    vertices: [0, 1, 2].map(|k| triangs[l[k].1][(l[k].2 + 2) % 3]),
                }
            })
            .collect();
        Self { mesh, rows }
    }

    fn with_rows(&self, rows: Vec<SuperTriangle>) -> Self {
        Self {
            mesh: Arc::clone(&self.mesh),
            rows,
        }
    }

    /// Background mesh.
    pub fn mesh(&self) -> &TriMesh {
        &self.mesh
    }

    pub fn rows(&self) -> &[SuperTriangle] {
        &self.rows
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Core triangle numbers.
    pub fn trinums(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.core).collect()
    }

    pub fn suptriangs(&self) -> Vec<Triangle> {
        self.rows.iter().map(|r| r.vertices).collect()
    }

    pub fn supbodies(&self) -> Vec<[usize; 4]> {
        self.rows.iter().map(SuperTriangle::bodies).collect()
    }

    /// Cores as a mesh over the background points.
    pub fn kermesh(&self) -> TriMesh {
        self.mesh.submesh(&self.trinums())
    }

    /// Supertriangles as a mesh over the background points.
    pub fn supmesh(&self) -> TriMesh {
        TriMesh::from_parts(self.mesh.points().to_vec(), self.suptriangs())
    }

    /// True when no background triangle belongs to two rows.
    pub fn is_compact(&self) -> bool {
        let mut seen = HashSet::with_capacity(4 * self.size());
        self.rows
            .iter()
            .flat_map(SuperTriangle::bodies)
            .all(|t| seen.insert(t))
    }

    /// Rows at the given positions, in that order.
    pub fn subtriu(&self, positions: &[usize]) -> SuperTriu {
        let rows = in_range(positions, self.size())
            .map(|i| self.rows[i])
            .collect();
        self.with_rows(rows)
    }

    /// Rows without the given positions.
    pub fn deltriangs(&self, positions: &[usize]) -> SuperTriu {
        let mut keep = vec![true; self.size()];
        for i in in_range(positions, self.size()) {
            keep[i] = false;
        }
        let rows = self
            .rows
            .iter()
            .zip(&keep)
            .filter_map(|(r, &k)| k.then_some(*r))
            .collect();
        self.with_rows(rows)
    }

    /// Rows whose core is one of `trinums`.
    pub fn atcores(&self, trinums: &[usize]) -> SuperTriu {
        let wanted: HashSet<usize> = trinums.iter().copied().collect();
        self.filter_rows(|r| wanted.contains(&r.core))
    }

    pub(crate) fn filter_rows(&self, keep: impl Fn(&SuperTriangle) -> bool) -> SuperTriu {
        let rows = self.rows.iter().filter(|r| keep(r)).copied().collect();
        self.with_rows(rows)
    }

    /// Position of the row whose supertriangle centroid is closest to `anchor`.
    pub fn find_seed(&self, anchor: Point2) -> Option<usize> {
        let points = self.mesh.points();
        self.rows
            .iter()
            .map(|r| {
                let [a, b, c] = r.vertices.map(|n| points[n]);
                metrics::centroid(a, b, c).dist(anchor)
            })
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Rows whose core is a void; `None` when there are none.
    pub fn supvoids(&self, tol: f64) -> Option<SuperTriu> {
        let voids: HashSet<usize> = find_voids(&self.mesh, tol)
            .into_iter()
            .map(|v| v.trinum)
            .collect();
        let sub = self.filter_rows(|r| voids.contains(&r.core));
        (!sub.is_empty()).then_some(sub)
    }
}

impl TriMesh {
    pub fn supertriu(&self) -> SuperTriu {
        SuperTriu::from_mesh(self)
    }
}

impl DebugInvariants for SuperTriu {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "SuperTriu");
    }

    fn validate_invariants(&self) -> Result<(), AmrError> {
        let ntriangs = self.mesh.ntriangs();
        let npoints = self.mesh.npoints();
        for row in &self.rows {
            if let Some(&t) = row.bodies().iter().find(|&&t| t >= ntriangs) {
                return Err(AmrError::NodeOutOfRange {
                    trinum: t,
                    node: row.core,
                    npoints: ntriangs,
                });
            }
            if let Some(&node) = row.vertices.iter().find(|&&n| n >= npoints) {
                return Err(AmrError::NodeOutOfRange {
                    trinum: row.core,
                    node,
                    npoints,
                });
            }
        }
        Ok(())
    }
}
