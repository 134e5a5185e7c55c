//! Triangle meshes.
//!
//! A [`TriMesh`] is a point array plus a table of node triples. Every
//! operation returns a new mesh; the receiver is never modified.
//!
//! # Expected invariants
//! - Every node number stored in `triangs` is `< npoints`.
//! - No triangle repeats a node.
//!
//! Triangles are counter-clockwise, except *voids*: degenerate triangles
//! `[west, east, pivot]` whose pivot sits at the midpoint of `west–east`
//! (see [`crate::topology::voids`]).

use std::ops::{Add, Mul, Sub};

use hashbrown::HashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::debug_invariants::DebugInvariants;
use crate::geometry::Point2;
use crate::geometry::metrics;
use crate::mesh_error::AmrError;
use crate::topology::pairs::edge_codes;

/// Node triple of one triangle.
pub type Triangle = [usize; 3];

/// An immutable planar triangle mesh.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TriMesh {
    points: Vec<Point2>,
    triangs: Vec<Triangle>,
}

static_assertions::assert_impl_all!(TriMesh: Send, Sync);

/// In-range positions of `indices`, in the given order.
pub(crate) fn in_range(indices: &[usize], len: usize) -> impl Iterator<Item = usize> + '_ {
    indices.iter().copied().filter(move |&i| i < len)
}

/// Sorted, unique, in-range copy of `indices`.
pub(crate) fn unique_in_range(indices: &[usize], len: usize) -> Vec<usize> {
    in_range(indices, len).sorted_unstable().dedup().collect()
}

impl TriMesh {
    /// Build a mesh, checking that every triangle references existing points.
    pub fn from_data(points: Vec<Point2>, triangs: Vec<Triangle>) -> Result<Self, AmrError> {
        Self { points, triangs }.validated()
    }

    /// Build a mesh from parts the caller already knows to be consistent.
    pub(crate) fn from_parts(points: Vec<Point2>, triangs: Vec<Triangle>) -> Self {
        let mesh = Self { points, triangs };
        crate::debug_invariants!(mesh.validate_invariants(), "TriMesh::from_parts");
        mesh
    }

    #[inline]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[inline]
    pub fn triangs(&self) -> &[Triangle] {
        &self.triangs
    }

    #[inline]
    pub fn point(&self, node: usize) -> Point2 {
        self.points[node]
    }

    #[inline]
    pub fn npoints(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn ntriangs(&self) -> usize {
        self.triangs.len()
    }

    /// Alias of [`ntriangs`](Self::ntriangs).
    #[inline]
    pub fn size(&self) -> usize {
        self.triangs.len()
    }

    /// True when the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangs.is_empty()
    }

    /// Sorted unique node numbers referenced by the triangles.
    pub fn nodes_range(&self) -> Vec<usize> {
        self.triangs
            .iter()
            .flatten()
            .copied()
            .sorted_unstable()
            .dedup()
            .collect()
    }

    pub fn nnodes(&self) -> usize {
        self.nodes_range().len()
    }

    /// Corner positions of triangle `trinum`.
    #[inline]
    pub fn vertices(&self, trinum: usize) -> [Point2; 3] {
        self.triangs[trinum].map(|n| self.points[n])
    }

    pub fn centroid(&self, trinum: usize) -> Point2 {
        let [a, b, c] = self.vertices(trinum);
        metrics::centroid(a, b, c)
    }

    pub fn centroids(&self) -> Vec<Point2> {
        (0..self.ntriangs()).map(|t| self.centroid(t)).collect()
    }

    /// Signed areas; voids have zero area.
    pub fn areas(&self) -> Vec<f64> {
        (0..self.ntriangs())
            .map(|t| {
                let [a, b, c] = self.vertices(t);
                metrics::signed_area(a, b, c)
            })
            .collect()
    }

    /// Edge codes of every triangle, one column per local edge.
    pub fn edges_paired(&self) -> Vec<[u64; 3]> {
        self.triangs.iter().map(edge_codes).collect()
    }

    /// Mesh made of the listed triangles, in the listed order.
    ///
    /// Out-of-range numbers are ignored. The point array is kept whole.
    pub fn submesh(&self, trinums: &[usize]) -> TriMesh {
        let triangs = in_range(trinums, self.ntriangs())
            .map(|t| self.triangs[t])
            .collect();
        TriMesh::from_parts(self.points.clone(), triangs)
    }

    /// Mesh without the listed triangles. Out-of-range numbers are ignored.
    pub fn deltriangs(&self, trinums: &[usize]) -> TriMesh {
        let mut keep = vec![true; self.ntriangs()];
        for t in in_range(trinums, self.ntriangs()) {
            keep[t] = false;
        }
        let triangs = self
            .triangs
            .iter()
            .zip(&keep)
            .filter_map(|(tri, &k)| k.then_some(*tri))
            .collect();
        TriMesh::from_parts(self.points.clone(), triangs)
    }

    /// Append triangles after the existing ones.
    pub fn add_triangs(&self, triangs: &[Triangle]) -> TriMesh {
        let mut all = self.triangs.clone();
        all.extend_from_slice(triangs);
        TriMesh::from_parts(self.points.clone(), all)
    }

    /// Append points after the existing ones.
    pub fn add_points(&self, points: &[Point2]) -> TriMesh {
        let mut all = self.points.clone();
        all.extend_from_slice(points);
        TriMesh::from_parts(all, self.triangs.clone())
    }

    /// Same triangles on a new point array.
    pub fn update_points(&self, points: Vec<Point2>) -> Result<TriMesh, AmrError> {
        TriMesh::from_data(points, self.triangs.clone())
    }

    /// Same points with a new triangle table.
    pub fn update_triangs(&self, triangs: Vec<Triangle>) -> Result<TriMesh, AmrError> {
        TriMesh::from_data(self.points.clone(), triangs)
    }

    /// Reorder triangles: listed ones first (duplicates and out-of-range
    /// numbers dropped), then the rest in their current order.
    pub fn shuffled(&self, order: &[usize]) -> TriMesh {
        let n = self.ntriangs();
        let mut taken = vec![false; n];
        let mut triangs = Vec::with_capacity(n);
        for t in in_range(order, n) {
            if !taken[t] {
                taken[t] = true;
                triangs.push(self.triangs[t]);
            }
        }
        triangs.extend(
            self.triangs
                .iter()
                .zip(&taken)
                .filter_map(|(tri, &done)| (!done).then_some(*tri)),
        );
        TriMesh::from_parts(self.points.clone(), triangs)
    }

    /// Reconnect triangles: node `from[i]` is replaced by `to[i]`.
    pub fn relabeled(&self, from: &[usize], to: &[usize]) -> TriMesh {
        let map: HashMap<usize, usize> = from.iter().copied().zip(to.iter().copied()).collect();
        let triangs = self
            .triangs
            .iter()
            .map(|tri| tri.map(|n| map.get(&n).copied().unwrap_or(n)))
            .collect();
        TriMesh::from_parts(self.points.clone(), triangs)
    }

    fn map_points(&self, f: impl Fn(Point2) -> Point2) -> TriMesh {
        TriMesh {
            points: self.points.iter().map(|&p| f(p)).collect(),
            triangs: self.triangs.clone(),
        }
    }

    pub fn translated(&self, shift: Point2) -> TriMesh {
        self.map_points(|p| p + shift)
    }

    pub fn scaled(&self, factor: f64) -> TriMesh {
        self.map_points(|p| p * factor)
    }

    /// Rotate counter-clockwise about the origin.
    pub fn rotated(&self, angle: f64) -> TriMesh {
        self.map_points(|p| p.rotated(angle))
    }
}

impl Add<Point2> for &TriMesh {
    type Output = TriMesh;
    fn add(self, shift: Point2) -> TriMesh {
        self.translated(shift)
    }
}

impl Sub<Point2> for &TriMesh {
    type Output = TriMesh;
    fn sub(self, shift: Point2) -> TriMesh {
        self.translated(-shift)
    }
}

impl Mul<f64> for &TriMesh {
    type Output = TriMesh;
    fn mul(self, factor: f64) -> TriMesh {
        self.scaled(factor)
    }
}

impl DebugInvariants for TriMesh {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "TriMesh");
    }

    fn validate_invariants(&self) -> Result<(), AmrError> {
        let npoints = self.npoints();
        for (trinum, tri) in self.triangs.iter().enumerate() {
            if let Some(&node) = tri.iter().find(|&&n| n >= npoints) {
                return Err(AmrError::NodeOutOfRange {
                    trinum,
                    node,
                    npoints,
                });
            }
            if tri[0] == tri[1] || tri[1] == tri[2] || tri[2] == tri[0] {
                return Err(AmrError::DegenerateTriangle(trinum));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> TriMesh {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        TriMesh::from_data(points, vec![[0, 1, 2], [2, 3, 0]]).unwrap()
    }

    #[test]
    fn rejects_out_of_range_nodes() {
        let err = TriMesh::from_data(vec![Point2::ORIGIN; 2], vec![[0, 1, 2]]).unwrap_err();
        assert_eq!(
            err,
            AmrError::NodeOutOfRange {
                trinum: 0,
                node: 2,
                npoints: 2
            }
        );
    }

    #[test]
    fn submesh_and_deltriangs_ignore_bad_indices() {
        let mesh = square();
        assert_eq!(mesh.submesh(&[1, 7]).triangs(), &[[2, 3, 0]]);
        assert_eq!(mesh.deltriangs(&[0, 9]).triangs(), &[[2, 3, 0]]);
        assert_eq!(mesh.deltriangs(&[]).ntriangs(), 2);
    }

    #[test]
    fn shuffled_appends_unlisted() {
        let mesh = square().add_triangs(&[[0, 1, 3]]);
        let order: Vec<_> = mesh.shuffled(&[2, 2, 5]).triangs().to_vec();
        assert_eq!(order, vec![[0, 1, 3], [0, 1, 2], [2, 3, 0]]);
    }

    #[test]
    fn transforms_keep_topology() {
        let mesh = square();
        let moved = &(&mesh * 2.0) + Point2::new(1.0, -1.0);
        assert_eq!(moved.triangs(), mesh.triangs());
        assert_eq!(moved.point(2), Point2::new(3.0, 1.0));
        assert!(mesh.areas().iter().all(|&a| (a - 0.5).abs() < 1e-14));
    }
}
