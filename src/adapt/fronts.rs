//! Fronts: triangles on either side of the hanging-node voids.
//!
//! A *coarse* front pairs every void with the coarse triangle across its
//! `west–east` edge. A *fine* front pairs every void with the fine triangle
//! opposite it around the pivot, plus the west and east triangles in between.

use std::collections::BTreeMap;

use crate::geometry::Point2;
use crate::mesh_error::AmrError;
use crate::topology::pairs::TableMap;
use crate::topology::skeleton::MeshSkeleton;
use crate::topology::supertriu::SuperTriu;
use crate::topology::trimesh::TriMesh;

/// One front triangle and the void it faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrontEntry {
    pub trinum: usize,
    pub void: usize,
    pub west: Option<usize>,
    pub east: Option<usize>,
}

/// Front of triangles over a mesh.
#[derive(Clone, Debug)]
pub struct TriFront<'a> {
    mesh: &'a TriMesh,
    entries: Vec<FrontEntry>,
}

impl<'a> TriFront<'a> {
    /// Coarse triangles next to voids.
    pub fn coarse(mesh: &'a TriMesh, tol: f64) -> Self {
        let entries = mesh
            .supertriu()
            .supvoids(tol)
            .map(|sv| {
                sv.rows()
                    .iter()
                    .map(|r| FrontEntry {
                        trinum: r.neighbors[0],
                        void: r.core,
                        west: None,
                        east: None,
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { mesh, entries }
    }

    /// Fine triangles opposite the voids around every pivot.
    pub fn fine(mesh: &'a TriMesh, tol: f64) -> Result<Self, AmrError> {
        let skeleton = MeshSkeleton::from_mesh(mesh, tol)?;
        let entries = skeleton
            .fans()
            .iter()
            .map(|f| FrontEntry {
                trinum: f.core,
                void: f.void,
                west: Some(f.west),
                east: Some(f.east),
            })
            .collect();
        Ok(Self { mesh, entries })
    }

    fn with_entries(&self, entries: Vec<FrontEntry>) -> Self {
        Self {
            mesh: self.mesh,
            entries,
        }
    }

    pub fn mesh(&self) -> &'a TriMesh {
        self.mesh
    }

    pub fn entries(&self) -> &[FrontEntry] {
        &self.entries
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn trinums(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.trinum).collect()
    }

    pub fn voids(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.void).collect()
    }

    pub fn wests(&self) -> Vec<usize> {
        self.entries.iter().filter_map(|e| e.west).collect()
    }

    pub fn easts(&self) -> Vec<usize> {
        self.entries.iter().filter_map(|e| e.east).collect()
    }

    /// Sub-fronts keyed by how many times their triangle occurs in the front.
    pub fn getspec(&self) -> BTreeMap<usize, TriFront<'a>> {
        let table = TableMap::from_column(&self.trinums());
        let mut spec: BTreeMap<usize, Vec<FrontEntry>> = BTreeMap::new();
        for group in table.groups() {
            spec.entry(group.len())
                .or_default()
                .extend(group.iter().map(|e| self.entries[e.row]));
        }
        spec.into_iter()
            .map(|(rank, entries)| (rank, self.with_entries(entries)))
            .collect()
    }

    /// Distinct occurrence counts, ascending.
    pub fn ranks(&self) -> Vec<usize> {
        self.getspec().into_keys().collect()
    }

    pub fn atrank(&self, rank: usize) -> Option<TriFront<'a>> {
        self.getspec().remove(&rank)
    }

    /// Offsets from each void centroid to its front triangle centroid.
    fn offsets(&self) -> Vec<Point2> {
        self.entries
            .iter()
            .map(|e| self.mesh.centroid(e.trinum) - self.mesh.centroid(e.void))
            .collect()
    }

    /// Direction angles (radians) from the voids to the front triangles.
    pub fn angles(&self) -> Vec<f64> {
        self.offsets().into_iter().map(Point2::angle).collect()
    }

    /// Distances from the voids to the front triangles.
    pub fn scales(&self) -> Vec<f64> {
        self.offsets().into_iter().map(Point2::norm).collect()
    }

    fn retain_by(&self, keep: impl IntoIterator<Item = bool>) -> Self {
        let entries = self
            .entries
            .iter()
            .zip(keep)
            .filter_map(|(e, k)| k.then_some(*e))
            .collect();
        self.with_entries(entries)
    }

    /// Keep entries whose triangle centroid satisfies `mask`.
    pub fn filter_by_mask(&self, mask: impl Fn(Point2) -> bool) -> Self {
        let keep: Vec<bool> = self
            .entries
            .iter()
            .map(|e| mask(self.mesh.centroid(e.trinum)))
            .collect();
        self.retain_by(keep)
    }

    pub fn filter_by_angle(&self, min: f64, max: f64) -> Self {
        self.retain_by(self.angles().into_iter().map(|a| a >= min && a <= max))
    }

    pub fn filter_by_scale(&self, min: f64, max: f64) -> Self {
        self.retain_by(self.scales().into_iter().map(|s| s >= min && s <= max))
    }

    /// Angle range followed by scale range.
    pub fn filter_by_normal(&self, angle: (f64, f64), scale: (f64, f64)) -> Self {
        self.filter_by_angle(angle.0, angle.1)
            .filter_by_scale(scale.0, scale.1)
    }

    /// Supertriangulation at the front triangles; `None` for an empty front.
    pub fn suptriu(&self) -> Option<SuperTriu> {
        if self.is_empty() {
            return None;
        }
        Some(self.mesh.supertriu().atcores(&self.trinums()))
    }
}
