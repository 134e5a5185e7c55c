//! Element-ranked units: every base triangle carries its own refinement.
//!
//! A [`TriElement`] wraps one triangle of a base mesh in a local
//! [`AmrUnit`]. Its `rank` counts how many uniform refinements the local
//! mesh holds. An [`ElementUnit`] keeps one element per base triangle and
//! activates each once, so fresh elements start at rank 1.

use crate::algs::inspect;
use crate::data::mass::{LumpedMassProvider, MassOperatorProvider};
use crate::geometry::Point2;
use crate::mesh_error::AmrError;
use crate::topology::trimesh::{TriMesh, Triangle, unique_in_range};

use super::AmrUnit;

/// One base triangle with its local refinement.
#[derive(Clone, Debug)]
pub struct TriElement<P = LumpedMassProvider> {
    nodes: Triangle,
    unit: AmrUnit<P>,
    rank: usize,
}

impl TriElement<LumpedMassProvider> {
    /// Rank-0 element over the corners of base triangle `nodes`.
    pub fn from_data(verts: [Point2; 3], nodes: Triangle) -> Result<Self, AmrError> {
        let mesh = TriMesh::from_data(verts.to_vec(), vec![[0, 1, 2]])?;
        Ok(Self {
            nodes,
            unit: AmrUnit::new(mesh),
            rank: 0,
        })
    }
}

impl<P> TriElement<P>
where
    P: MassOperatorProvider + Clone,
{
    pub fn with_provider<Q>(self, provider: Q) -> TriElement<Q>
    where
        Q: MassOperatorProvider + Clone,
    {
        TriElement {
            nodes: self.nodes,
            unit: self.unit.with_provider(provider),
            rank: self.rank,
        }
    }

    /// Base-mesh node numbers of the element corners.
    pub fn nodes(&self) -> Triangle {
        self.nodes
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn unit(&self) -> &AmrUnit<P> {
        &self.unit
    }

    pub fn mesh(&self) -> &TriMesh {
        self.unit.mesh()
    }

    /// First corner; coarsening starts its search here.
    pub fn anchor(&self) -> Point2 {
        self.unit.mesh().point(0)
    }

    pub fn makedata(self, key: &str, func: impl Fn(f64, f64) -> f64) -> Result<Self, AmrError> {
        let unit = self.unit.makedata(key, func, true)?;
        Ok(Self { unit, ..self })
    }

    /// Refine every local triangle once.
    pub fn refine(&self) -> Result<Self, AmrError> {
        Ok(Self {
            nodes: self.nodes,
            unit: self.unit.refine_all()?,
            rank: self.rank + 1,
        })
    }

    /// Undo one level of local refinement.
    ///
    /// The local triangles are reordered breadth-first from the anchor, then
    /// the reduced supertriangulation is coarsened. An element without a
    /// compact cluster is returned as is.
    pub fn coarsen(&self) -> Result<Self, AmrError> {
        let mesh = self.unit.mesh();
        let order = inspect::find_subset(mesh, mesh.ntriangs(), Some(self.anchor()), false);
        let shuffled = AmrUnit {
            mesh: mesh.shuffled(&order),
            ..self.unit.clone()
        };
        let min_size = shuffled.config.min_reduced_size;
        let Some(cluster) = shuffled.mesh.supertriu().reduce_with(None, min_size) else {
            log::debug!("element {:?}: nothing to coarsen at rank {}", self.nodes, self.rank);
            return Ok(self.clone());
        };
        Ok(Self {
            nodes: self.nodes,
            unit: shuffled.coarsen(&cluster.trinums())?,
            rank: self.rank.saturating_sub(1),
        })
    }
}

/// Per-triangle units over a base mesh.
#[derive(Clone, Debug)]
pub struct ElementUnit<P = LumpedMassProvider> {
    mesh: TriMesh,
    elements: Vec<TriElement<P>>,
}

impl ElementUnit<LumpedMassProvider> {
    /// One activated element per triangle of `mesh`.
    pub fn from_mesh(mesh: &TriMesh) -> Result<Self, AmrError> {
        let elements = mesh
            .triangs()
            .iter()
            .enumerate()
            .map(|(t, &nodes)| TriElement::from_data(mesh.vertices(t), nodes)?.refine())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            mesh: mesh.clone(),
            elements,
        })
    }
}

impl<P> ElementUnit<P>
where
    P: MassOperatorProvider + Clone,
{
    pub fn mesh(&self) -> &TriMesh {
        &self.mesh
    }

    pub fn elements(&self) -> &[TriElement<P>] {
        &self.elements
    }

    pub fn ranks(&self) -> Vec<usize> {
        self.elements.iter().map(TriElement::rank).collect()
    }

    pub fn size(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Point counts of the local meshes.
    pub fn counts(&self) -> Vec<usize> {
        self.elements.iter().map(|e| e.mesh().npoints()).collect()
    }

    /// Field names, taken from the first element.
    pub fn data_keys(&self) -> Vec<String> {
        self.elements
            .first()
            .map(|e| e.unit().keys().map(str::to_owned).collect())
            .unwrap_or_default()
    }

    fn update(
        mut self,
        elmnums: &[usize],
        step: impl Fn(&TriElement<P>) -> Result<TriElement<P>, AmrError>,
    ) -> Result<Self, AmrError> {
        for i in unique_in_range(elmnums, self.size()) {
            self.elements[i] = step(&self.elements[i])?;
        }
        Ok(self)
    }

    /// Refine the listed elements; duplicates and bad numbers are ignored.
    pub fn refine(self, elmnums: &[usize]) -> Result<Self, AmrError> {
        self.update(elmnums, TriElement::refine)
    }

    /// Coarsen the listed elements; duplicates and bad numbers are ignored.
    pub fn coarsen(self, elmnums: &[usize]) -> Result<Self, AmrError> {
        self.update(elmnums, TriElement::coarsen)
    }

    pub fn refine_all(self) -> Result<Self, AmrError> {
        let all: Vec<usize> = (0..self.size()).collect();
        self.refine(&all)
    }

    pub fn coarsen_all(self) -> Result<Self, AmrError> {
        let all: Vec<usize> = (0..self.size()).collect();
        self.coarsen(&all)
    }

    pub fn makedata(mut self, key: &str, func: impl Fn(f64, f64) -> f64) -> Result<Self, AmrError> {
        self.elements = self
            .elements
            .into_iter()
            .map(|e| e.makedata(key, &func))
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    /// Base triangles around the base node closest to `anchor`.
    pub fn find_node(&self, anchor: Point2) -> Result<Vec<usize>, AmrError> {
        Ok(inspect::find_node(&self.mesh, anchor)?.trinums())
    }

    pub fn find_subset(&self, count: usize, anchor: Option<Point2>, remove_heads: bool) -> Vec<usize> {
        inspect::find_subset(&self.mesh, count, anchor, remove_heads)
    }

    pub fn find_masked(&self, mask: impl Fn(f64, f64) -> bool) -> Vec<usize> {
        inspect::find_masked(&self.mesh, |p| mask(p.x, p.y))
    }
}
