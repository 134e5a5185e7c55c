//! Conservative node-field transport from a mesh to its coarsening.

use nalgebra::DMatrix;
use nalgebra_sparse::factorization::CscCholesky;
use once_cell::sync::OnceCell;

use crate::data::mass::MassOperators;
use crate::mesh_error::AmrError;

/// Projects node data of a fine (root) mesh onto its coarsening.
///
/// The root field is copied onto the mass mesh, projected in the lumped mass
/// norm onto the constrained space (`u = P (P^T M P)^-1 P^T M d`), and the
/// result is read off at the nodes of the coarsened mesh. Root nodes that
/// the mass mesh does not carry receive zero.
#[derive(Debug)]
pub struct DataCollector {
    root_len: usize,
    root2mass: Vec<usize>,
    root2data: Vec<usize>,
    operators: MassOperators,
    factor: OnceCell<CscCholesky<f64>>,
}

impl DataCollector {
    /// * `root2mass[mass node] = root node`
    /// * `root2data[coarsened node] = root node`
    pub fn new(
        root_len: usize,
        root2mass: Vec<usize>,
        root2data: Vec<usize>,
        operators: MassOperators,
    ) -> Self {
        Self {
            root_len,
            root2mass,
            root2data,
            operators,
            factor: OnceCell::new(),
        }
    }

    /// Number of nodes of the coarsened mesh.
    pub fn len(&self) -> usize {
        self.root2data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root2data.is_empty()
    }

    /// Number of nodes of the root mesh.
    pub fn source_len(&self) -> usize {
        self.root_len
    }

    pub fn root2mass(&self) -> &[usize] {
        &self.root2mass
    }

    pub fn root2data(&self) -> &[usize] {
        &self.root2data
    }

    pub fn operators(&self) -> &MassOperators {
        &self.operators
    }

    fn factor(&self) -> Result<&CscCholesky<f64>, AmrError> {
        self.factor.get_or_try_init(|| {
            CscCholesky::factor(&self.operators.constrained)
                .map_err(|e| AmrError::Factorization(format!("{e:?}")))
        })
    }

    /// Transport a root node field onto the coarsened mesh.
    pub fn collect(&self, data: &[f64]) -> Result<Vec<f64>, AmrError> {
        if data.len() != self.root_len {
            return Err(AmrError::DataLengthMismatch {
                expected: self.root_len,
                found: data.len(),
            });
        }
        let ops = &self.operators;
        let d_unit: Vec<f64> = ops
            .mass2unit
            .iter()
            .map(|&node| data[self.root2mass[node]])
            .collect();
        let d_unit = DMatrix::from_vec(d_unit.len(), 1, d_unit);
        let rhs = &ops.prolongation.transpose() * &(&ops.lumped * &d_unit);
        let x = self.factor()?.solve(&rhs);
        let u_unit = &ops.prolongation * &x;

        let mut on_root = vec![0.0; self.root_len];
        for (node, &root) in self.root2mass.iter().enumerate() {
            on_root[root] = u_unit[ops.unit2mass[node]];
        }
        Ok(self.root2data.iter().map(|&r| on_root[r]).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::VOID_TOL;
    use crate::mesh_generation::{GridKind, trigrid};
    use crate::topology::coarsen::coarsen_mesh;
    use crate::topology::refine::refine_mesh;
    use crate::topology::skeleton::MeshSkeleton;

    #[test]
    fn constant_fields_stay_constant() {
        let fine = refine_mesh(&trigrid(4, 4, GridKind::EastSlope), &[8])
            .unwrap()
            .mesh;
        let mut cores = MeshSkeleton::from_mesh(&fine, VOID_TOL).unwrap().cores();
        cores.sort_unstable();
        cores.dedup();
        let collector = coarsen_mesh(&fine, &cores).unwrap().collector.unwrap();
        let out = collector.collect(&vec![3.5; fine.npoints()]).unwrap();
        assert_eq!(out.len(), collector.len());
        assert!(out.iter().all(|v| (v - 3.5).abs() < 1e-12));
        assert!(collector.collect(&[1.0]).is_err());
    }
}
