//! Adaptive refinement units: a mesh plus the node fields that follow it.
//!
//! [`AmrUnit`] owns a [`TriMesh`] and a set of named node fields. Refining
//! or coarsening returns a new unit whose fields were carried over by the
//! [`DataRefiner`](crate::data::refiner::DataRefiner) or
//! [`DataCollector`](crate::data::collector::DataCollector) of that step.
//! [`element::ElementUnit`] builds per-triangle units on top of it.

pub mod element;
pub mod fronts;

use std::collections::BTreeMap;

use crate::algs::inspect;
use crate::config::AmrConfig;
use crate::data::hanging_node_constraints::HangingNodeConstraints;
use crate::data::mass::{LumpedMassProvider, MassOperatorProvider};
use crate::geometry::Point2;
use crate::mesh_error::AmrError;
use crate::topology::coarsen::coarsen_mesh_with;
use crate::topology::nodes_map::NodesMap;
use crate::topology::refine::refine_mesh_with;
use crate::topology::trimesh::TriMesh;

pub use element::{ElementUnit, TriElement};
pub use fronts::{FrontEntry, TriFront};

/// Node fields keyed by name.
pub type FieldMap = BTreeMap<String, Vec<f64>>;

/// A mesh with node-valued data fields.
#[derive(Clone, Debug)]
pub struct AmrUnit<P = LumpedMassProvider> {
    mesh: TriMesh,
    data: FieldMap,
    config: AmrConfig,
    provider: P,
}

impl AmrUnit<LumpedMassProvider> {
    /// Unit over `mesh` with no fields and default settings.
    pub fn new(mesh: TriMesh) -> Self {
        Self {
            mesh,
            data: FieldMap::new(),
            config: AmrConfig::default(),
            provider: LumpedMassProvider::default(),
        }
    }
}

impl<P> AmrUnit<P>
where
    P: MassOperatorProvider + Clone,
{
    /// Replace the pipeline settings. The lumped provider is not touched.
    pub fn with_config(mut self, config: AmrConfig) -> Result<Self, AmrError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Swap the mass-operator provider used by [`coarsen`](Self::coarsen).
    pub fn with_provider<Q>(self, provider: Q) -> AmrUnit<Q>
    where
        Q: MassOperatorProvider + Clone,
    {
        AmrUnit {
            mesh: self.mesh,
            data: self.data,
            config: self.config,
            provider,
        }
    }

    /// Replace every field at once; each must hold one value per point.
    pub fn with_data(mut self, data: FieldMap) -> Result<Self, AmrError> {
        for values in data.values() {
            self.check_len(values)?;
        }
        self.data = data;
        Ok(self)
    }

    pub fn mesh(&self) -> &TriMesh {
        &self.mesh
    }

    pub fn data(&self) -> &FieldMap {
        &self.data
    }

    pub fn config(&self) -> &AmrConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.data.keys().map(String::as_str)
    }

    pub fn field(&self, key: &str) -> Result<&[f64], AmrError> {
        self.data
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| AmrError::UnknownField(key.to_owned()))
    }

    fn check_len(&self, values: &[f64]) -> Result<(), AmrError> {
        if values.len() != self.mesh.npoints() {
            return Err(AmrError::DataLengthMismatch {
                expected: self.mesh.npoints(),
                found: values.len(),
            });
        }
        Ok(())
    }

    /// Insert or replace a field.
    pub fn insert_field(&mut self, key: impl Into<String>, values: Vec<f64>) -> Result<(), AmrError> {
        self.check_len(&values)?;
        self.data.insert(key.into(), values);
        Ok(())
    }

    /// Evaluate `func` at every point and store the result under `key`.
    ///
    /// With `constrained`, every pivot value is then replaced by the mean of
    /// its void's west and east values.
    pub fn makedata(
        mut self,
        key: impl Into<String>,
        func: impl Fn(f64, f64) -> f64,
        constrained: bool,
    ) -> Result<Self, AmrError> {
        let mut values: Vec<f64> = self.mesh.points().iter().map(|p| func(p.x, p.y)).collect();
        if constrained {
            HangingNodeConstraints::from_mesh(&self.mesh, self.config.void_tol).apply(&mut values)?;
        }
        self.data.insert(key.into(), values);
        Ok(self)
    }

    fn with_mesh(&self, mesh: TriMesh, data: FieldMap) -> Self {
        Self {
            mesh,
            data,
            config: self.config.clone(),
            provider: self.provider.clone(),
        }
    }

    /// Refine the listed triangles; an empty list returns a copy of the unit.
    pub fn refine(&self, trinums: &[usize]) -> Result<Self, AmrError> {
        if trinums.is_empty() {
            return Ok(self.clone());
        }
        let refined = refine_mesh_with(&self.mesh, trinums, &self.config)?;
        let data = self
            .data
            .iter()
            .map(|(key, values)| Ok((key.clone(), refined.refiner.refine(values)?)))
            .collect::<Result<FieldMap, AmrError>>()?;
        Ok(self.with_mesh(refined.mesh, data))
    }

    pub fn refine_all(&self) -> Result<Self, AmrError> {
        let all: Vec<usize> = (0..self.mesh.ntriangs()).collect();
        self.refine(&all)
    }

    /// Coarsen the clusters whose cores are listed.
    ///
    /// When no cluster qualifies the unit is returned unchanged.
    pub fn coarsen(&self, cores: &[usize]) -> Result<Self, AmrError> {
        if cores.is_empty() {
            return Ok(self.clone());
        }
        let coarsened = coarsen_mesh_with(&self.mesh, cores, &self.provider, &self.config)?;
        let Some(collector) = coarsened.collector else {
            return Ok(self.clone());
        };
        let data = self
            .data
            .iter()
            .map(|(key, values)| Ok((key.clone(), collector.collect(values)?)))
            .collect::<Result<FieldMap, AmrError>>()?;
        Ok(self.with_mesh(coarsened.mesh, data))
    }

    pub fn find_node(&self, anchor: Point2) -> Result<NodesMap, AmrError> {
        inspect::find_node(&self.mesh, anchor)
    }

    pub fn find_subset(&self, count: usize, anchor: Option<Point2>, remove_heads: bool) -> Vec<usize> {
        inspect::find_subset(&self.mesh, count, anchor, remove_heads)
    }

    pub fn find_masked(&self, mask: impl Fn(f64, f64) -> bool) -> Vec<usize> {
        inspect::find_masked(&self.mesh, |p| mask(p.x, p.y))
    }

    /// Coarse triangles facing the voids.
    pub fn front_coarse(&self) -> TriFront<'_> {
        TriFront::coarse(&self.mesh, self.config.void_tol)
    }

    /// Fine triangles around the pivots.
    pub fn front_fine(&self) -> Result<TriFront<'_>, AmrError> {
        TriFront::fine(&self.mesh, self.config.void_tol)
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
        TriMesh::from_data(points, vec![[2, 3, 0], [0, 1, 2]]).unwrap()
    }

    #[test]
    fn empty_requests_keep_the_unit() {
        let unit = AmrUnit::new(square()).makedata("u", |x, _| x, true).unwrap();
        assert_eq!(unit.refine(&[]).unwrap().mesh(), unit.mesh());
        assert_eq!(unit.coarsen(&[]).unwrap().field("u").unwrap(), unit.field("u").unwrap());
    }

    #[test]
    fn refined_fields_respect_voids() {
        let unit = AmrUnit::new(square())
            .makedata("u", |x, y| x * x + y, true)
            .unwrap()
            .refine(&[1])
            .unwrap();
        let u = unit.field("u").unwrap();
        assert_eq!(u.len(), unit.mesh().npoints());
        for v in unit.mesh().voids() {
            assert_eq!(u[v.pivot], 0.5 * (u[v.west] + u[v.east]));
        }
    }

    #[test]
    fn field_errors() {
        let mut unit = AmrUnit::new(square());
        assert_eq!(unit.field("p"), Err(AmrError::UnknownField("p".into())));
        assert!(matches!(
            unit.insert_field("p", vec![0.0; 3]),
            Err(AmrError::DataLengthMismatch { expected: 4, found: 3 })
        ));
    }

    #[test]
    fn refine_then_coarsen_restores_the_mesh() {
        let unit = AmrUnit::new(square()).makedata("u", |x, y| 2.0 * x - y, true).unwrap();
        let fine = unit.refine(&[1]).unwrap();
        let front = fine.front_fine().unwrap();
        assert_eq!(front.size(), 1);
        let cores = front.suptriu().unwrap().trinums();
        assert_eq!(cores, front.trinums());
        let back = fine.coarsen(&cores).unwrap();
        assert_eq!(back.mesh().npoints(), 4);
        assert_eq!(back.mesh().ntriangs(), 2);
        let u = back.field("u").unwrap();
        for (p, value) in back.mesh().points().iter().zip(u) {
            assert!((value - (2.0 * p.x - p.y)).abs() < 1e-10);
        }
    }
}
