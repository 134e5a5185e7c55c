//! Mass operators for conservative node-data transfer.
//!
//! A [`MassOperatorProvider`] turns a mesh (with voids) into the matrices the
//! [`DataCollector`](crate::data::collector::DataCollector) needs. Operators
//! use a *unit ordering* of the nodes: masters first, then pivots, each in
//! ascending node order.

use nalgebra_sparse::{CooMatrix, CscMatrix};

use crate::config::VOID_TOL;
use crate::data::hanging_node_constraints::HangingNodeConstraints;
use crate::mesh_error::AmrError;
use crate::topology::skeleton::MeshSkeleton;
use crate::topology::trimesh::TriMesh;
use crate::topology::voids::find_voids;

/// Matrices of one mesh in unit ordering.
#[derive(Clone, Debug)]
pub struct MassOperators {
    /// Diagonal lumped mass, `n x n`.
    pub lumped: CscMatrix<f64>,
    /// Prolongation `P` from master values to all nodes, `n x m`.
    pub prolongation: CscMatrix<f64>,
    /// Constrained mass `P^T M P`, `m x m`.
    pub constrained: CscMatrix<f64>,
    /// `mass2unit[u]` is the mesh node at unit position `u`.
    pub mass2unit: Vec<usize>,
    /// `unit2mass[node]` is the unit position of mesh node `node`.
    pub unit2mass: Vec<usize>,
}

impl MassOperators {
    /// Number of unconstrained nodes.
    pub fn nmasters(&self) -> usize {
        self.constrained.nrows()
    }

    pub fn nnodes(&self) -> usize {
        self.mass2unit.len()
    }
}

/// Builds mass operators for a mesh.
pub trait MassOperatorProvider {
    fn mass_operators(&self, mesh: &TriMesh) -> Result<MassOperators, AmrError>;
}

/// Row-sum lumped P1 mass with hanging-node prolongation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LumpedMassProvider {
    pub void_tol: f64,
}

impl Default for LumpedMassProvider {
    fn default() -> Self {
        Self { void_tol: VOID_TOL }
    }
}

/// Lumped node masses: a third of every non-void triangle area per corner.
pub fn lumped_mass(mesh: &TriMesh, tol: f64) -> Vec<f64> {
    let mut is_void = vec![false; mesh.ntriangs()];
    for v in find_voids(mesh, tol) {
        is_void[v.trinum] = true;
    }
    let mut mass = vec![0.0; mesh.npoints()];
    for ((tri, area), void) in mesh.triangs().iter().zip(mesh.areas()).zip(is_void) {
        if void {
            continue;
        }
        for &n in tri {
            mass[n] += area.abs() / 3.0;
        }
    }
    mass
}

/// Integral of the piecewise-linear field `data` over `mesh`.
pub fn lumped_total(mesh: &TriMesh, data: &[f64], tol: f64) -> Result<f64, AmrError> {
    if data.len() != mesh.npoints() {
        return Err(AmrError::DataLengthMismatch {
            expected: mesh.npoints(),
            found: data.len(),
        });
    }
    Ok(lumped_mass(mesh, tol)
        .iter()
        .zip(data)
        .map(|(m, d)| m * d)
        .sum())
}

impl MassOperatorProvider for LumpedMassProvider {
    fn mass_operators(&self, mesh: &TriMesh) -> Result<MassOperators, AmrError> {
        let ghosts = mesh.getghosts().len();
        if ghosts > 0 {
            return Err(AmrError::GhostNodes(ghosts));
        }
        // rejects pivots that are not shared by exactly four triangles
        MeshSkeleton::from_mesh(mesh, self.void_tol)?;
        let constraints = HangingNodeConstraints::from_mesh(mesh, self.void_tol);
        let resolved = constraints.resolve_all()?;

        let n = mesh.npoints();
        let pivots = constraints.pivots();
        let mut mass2unit: Vec<usize> = (0..n).filter(|&i| !constraints.is_pivot(i)).collect();
        let nmasters = mass2unit.len();
        mass2unit.extend(&pivots);
        let mut unit2mass = vec![0; n];
        for (u, &node) in mass2unit.iter().enumerate() {
            unit2mass[node] = u;
        }

        // prolongation rows in unit ordering
        let mut rows: Vec<Vec<(usize, f64)>> = (0..nmasters).map(|u| vec![(u, 1.0)]).collect();
        for pivot in &pivots {
            let terms = resolved.get(pivot).map(Vec::as_slice).unwrap_or_default();
            rows.push(terms.iter().map(|t| (unit2mass[t.node], t.weight)).collect());
        }

        let mass = lumped_mass(mesh, self.void_tol);
        let mut lumped = CooMatrix::new(n, n);
        let mut prolongation = CooMatrix::new(n, nmasters);
        let mut constrained = CooMatrix::new(nmasters, nmasters);
        for (u, row) in rows.iter().enumerate() {
            let m = mass[mass2unit[u]];
            lumped.push(u, u, m);
            for &(a, wa) in row {
                prolongation.push(u, a, wa);
                for &(b, wb) in row {
                    constrained.push(a, b, m * wa * wb);
                }
            }
        }
        log::debug!(
            "mass operators: {} nodes, {} masters, {} pivots",
            n,
            nmasters,
            pivots.len()
        );
        Ok(MassOperators {
            lumped: CscMatrix::from(&lumped),
            prolongation: CscMatrix::from(&prolongation),
            constrained: CscMatrix::from(&constrained),
            mass2unit,
            unit2mass,
        })
    }
}
