//! Coarsening: undo refinements by merging compact clusters.
//!
//! A *cluster* is a supertriangle row (core plus three neighbours) whose
//! core node `k_i` sits at the midpoint of the supertriangle side opposite
//! `s_i`. Coarsening replaces the four bodies by the supertriangle and hangs
//! a void on every side, then removes the voids that are no longer needed.
//!
//! 1. *targets*: requested cores (unique, in range) → their rows;
//!    rows sharing a body with another row are dropped, and so are rows that
//!    are not aligned;
//! 2. *alpha*: bodies removed, voids `[s1, s0, k1]`, `[s2, s1, k2]`,
//!    `[s0, s2, k0]` added;
//! 3. *beta*: voids whose `west–east` code occurs twice (twins) are dropped,
//!    as are voids whose pivot is a boundary node of the root mesh;
//! 4. *gamma*: supertriangles added, ghost nodes removed.
//!
//! Data is carried over by a [`DataCollector`] built on the [`MassMesh`].

mod mass_mesh;

pub use mass_mesh::MassMesh;

use hashbrown::{HashMap, HashSet};

use crate::config::AmrConfig;
use crate::data::collector::DataCollector;
use crate::data::mass::{LumpedMassProvider, MassOperatorProvider};
use crate::debug_invariants::DebugInvariants;
use crate::geometry::Point2;
use crate::mesh_error::AmrError;
use crate::topology::pairs::{TableMap, sympaired};
use crate::topology::skeleton::MeshSkeleton;
use crate::topology::supertriu::SuperTriu;
use crate::topology::trimesh::{TriMesh, Triangle, unique_in_range};
use crate::topology::voids::find_voids;

/// Output of [`coarsen_mesh`].
///
/// `collector` is `None` when nothing was coarsened; the mesh is then the
/// input mesh and node data carries over unchanged.
#[derive(Debug)]
pub struct CoarsenedMesh {
    pub mesh: TriMesh,
    pub collector: Option<DataCollector>,
}

/// Coarsen the clusters whose cores are listed, with default settings.
pub fn coarsen_mesh(mesh: &TriMesh, trinums: &[usize]) -> Result<CoarsenedMesh, AmrError> {
    coarsen_mesh_with(
        mesh,
        trinums,
        &LumpedMassProvider::default(),
        &AmrConfig::default(),
    )
}

/// Coarsen the clusters whose cores are listed.
pub fn coarsen_mesh_with<P>(
    mesh: &TriMesh,
    trinums: &[usize],
    provider: &P,
    config: &AmrConfig,
) -> Result<CoarsenedMesh, AmrError>
where
    P: MassOperatorProvider + ?Sized,
{
    config.validate()?;
    let unchanged = || CoarsenedMesh {
        mesh: mesh.clone(),
        collector: None,
    };
    let cores = unique_in_range(trinums, mesh.ntriangs());
    if cores.is_empty() {
        return Ok(unchanged());
    }
    let suptri = select_clusters(mesh, &cores, config.align_tol);
    if suptri.is_empty() {
        log::warn!("coarsen: none of {} requested cores forms a cluster", cores.len());
        return Ok(unchanged());
    }

    let alpha = alpha_mesh(mesh, &suptri);
    let beta = beta_mesh(mesh, &alpha, config.void_tol);
    let cleaned = beta.add_triangs(&suptri.suptriangs()).delghosts();
    let gamma = cleaned.mesh;
    check_meshable(&gamma, config.void_tol)?;
    log::debug!(
        "coarsen: {} clusters, {} -> {} triangles",
        suptri.size(),
        mesh.ntriangs(),
        gamma.ntriangs()
    );

    let mass = MassMesh::with_tol(&suptri, config.void_tol);
    let operators = provider.mass_operators(&mass.mesh)?;
    let collector = DataCollector::new(mesh.npoints(), mass.root2mass, cleaned.old_nodes, operators);
    gamma.debug_assert_invariants();
    Ok(CoarsenedMesh {
        mesh: gamma,
        collector: Some(collector),
    })
}

/// Rows at the requested cores that can be coarsened together.
pub fn select_clusters(mesh: &TriMesh, cores: &[usize], align_tol: f64) -> SuperTriu {
    let suptri = mesh.supertriu().atcores(cores);
    let suptri = clean_overlaps(&suptri);
    clean_not_aligned(&suptri, align_tol)
}

/// Drop rows that share a body triangle with another row.
pub fn clean_overlaps(suptri: &SuperTriu) -> SuperTriu {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for t in suptri.supbodies().into_iter().flatten() {
        *counts.entry(t).or_insert(0) += 1;
    }
    suptri.filter_rows(|r| r.bodies().iter().all(|t| counts[t] == 1))
}

/// Drop rows whose core nodes are not the supertriangle side midpoints.
pub fn clean_not_aligned(suptri: &SuperTriu, tol: f64) -> SuperTriu {
    let mesh = suptri.mesh();
    suptri.filter_rows(|r| {
        let [k0, k1, k2] = mesh.triangs()[r.core].map(|n| mesh.point(n));
        let [s0, s1, s2] = r.vertices.map(|n| mesh.point(n));
        [(s0, s1, k1), (s1, s2, k2), (s2, s0, k0)]
            .iter()
            .all(|&(a, b, k)| (Point2::midpoint(a, b) - k).norm() <= tol)
    })
}

fn alpha_mesh(mesh: &TriMesh, suptri: &SuperTriu) -> TriMesh {
    let bodies: Vec<usize> = suptri.supbodies().into_iter().flatten().collect();
    let mut voids: Vec<Triangle> = Vec::with_capacity(3 * suptri.size());
    for (a, b, k) in [(1usize, 0usize, 1usize), (2, 1, 2), (0, 2, 0)] {
        voids.extend(suptri.rows().iter().map(|r| {
            let kernel = mesh.triangs()[r.core];
            [r.vertices[a], r.vertices[b], kernel[k]]
        }));
    }
    mesh.deltriangs(&bodies).add_triangs(&voids)
}

fn beta_mesh(root: &TriMesh, alpha: &TriMesh, tol: f64) -> TriMesh {
    let voids = find_voids(alpha, tol);
    let codes: Vec<u64> = voids.iter().map(|v| sympaired(v.west, v.east)).collect();
    let mut dropped: Vec<usize> = TableMap::from_column(&codes)
        .at_rank(2)
        .flat_map(|g| [voids[g[0].row].trinum, voids[g[1].row].trinum])
        .collect();
    let edge_nodes: HashSet<usize> = root.meshedge().nodnums_unique().into_iter().collect();
    dropped.extend(
        voids
            .iter()
            .filter(|v| edge_nodes.contains(&v.pivot))
            .map(|v| v.trinum),
    );
    alpha.deltriangs(&dropped)
}

fn check_meshable(mesh: &TriMesh, tol: f64) -> Result<(), AmrError> {
    match MeshSkeleton::from_mesh(mesh, tol) {
        Ok(_) => Ok(()),
        Err(AmrError::PivotRank { pivot, rank }) => {
            Err(AmrError::NonMeshableCluster { pivot, rank })
        }
        Err(AmrError::DuplicatePivot(pivot)) => {
            Err(AmrError::NonMeshableCluster { pivot, rank: 0 })
        }
        Err(other) => Err(other),
    }
}
