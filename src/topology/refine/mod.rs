//! Selective red refinement of triangle meshes with hanging-node voids.
//!
//! Each target triangle `[v0, v1, v2]` is split into its centre triangle
//! `[m01, m12, m20]` and three corner triangles. Where a target borders a
//! triangle that is not refined, a void `[v_l, v_{l+1}, m]` is inserted so
//! the mesh stays conforming in the void sense.
//!
//! The pipeline runs in stages:
//! 1. *targets*: requested triangles, unique and in range, minus any triangle
//!    touching a void pivot (this also covers the void "ears");
//! 2. *core*: one node per distinct edge of the targets, numbered in edge
//!    code order;
//! 3. *alpha*: targets replaced by centres, corners and voids; midpoints
//!    appended to the point array;
//! 4. *beta*: voids lying on the boundary are dropped; pairs of voids on the
//!    same coarse edge ("twins") are dropped and the new midpoint is merged
//!    into the existing pivot.
//!
//! # Expected invariants
//! - The result keeps every pivot shared by exactly four triangles when the
//!   source did.
//! - Refining an empty selection returns the source mesh unchanged.

use hashbrown::HashSet;

use crate::config::AmrConfig;
use crate::data::refiner::DataRefiner;
use crate::debug_invariants::DebugInvariants;
use crate::geometry::Point2;
use crate::mesh_error::AmrError;
use crate::topology::pairs::{TableMap, edge_codes, norm_table, sympaired};
use crate::topology::trimesh::{TriMesh, Triangle, unique_in_range};
use crate::topology::voids::find_voids;

/// Output of [`refine_mesh`]: the refined mesh and its data transport.
#[derive(Clone, Debug)]
pub struct RefinedMesh {
    pub mesh: TriMesh,
    pub refiner: DataRefiner,
}

/// Refine the listed triangles with default tolerances.
pub fn refine_mesh(mesh: &TriMesh, trinums: &[usize]) -> Result<RefinedMesh, AmrError> {
    refine_mesh_with(mesh, trinums, &AmrConfig::default())
}

/// Refine the listed triangles.
pub fn refine_mesh_with(
    mesh: &TriMesh,
    trinums: &[usize],
    config: &AmrConfig,
) -> Result<RefinedMesh, AmrError> {
    config.validate()?;
    let targets = select_targets(mesh, trinums, config.void_tol);
    if targets.is_empty() {
        if !trinums.is_empty() {
            log::warn!("refine: all {} requested triangles were filtered out", trinums.len());
        }
        return Ok(RefinedMesh {
            mesh: mesh.clone(),
            refiner: DataRefiner::identity(mesh.npoints()),
        });
    }

    let core = CoreStage::new(mesh, &targets);
    let alpha = alpha_mesh(mesh, &targets, &core);
    log::debug!(
        "refine: {} targets, {} midpoints, alpha mesh has {} triangles",
        targets.len(),
        core.points.len(),
        alpha.ntriangs()
    );
    let beta = BetaStage::new(&alpha, config.void_tol);
    let alpha_images = core.alpha_images(mesh.npoints());
    let nodes_images = beta.beta2alpha.iter().map(|&a| alpha_images[a]).collect();

    beta.mesh.debug_assert_invariants();
    Ok(RefinedMesh {
        mesh: beta.mesh,
        refiner: DataRefiner::new(nodes_images, mesh.npoints()),
    })
}

/// Unique in-range targets that do not touch a void pivot.
fn select_targets(mesh: &TriMesh, trinums: &[usize], tol: f64) -> Vec<usize> {
    let voids = find_voids(mesh, tol);
    let pivots: HashSet<usize> = voids.iter().map(|v| v.pivot).collect();
    let ears: HashSet<u64> = voids
        .iter()
        .flat_map(|v| [sympaired(v.east, v.pivot), sympaired(v.pivot, v.west)])
        .collect();
    let triangs = mesh.triangs();
    unique_in_range(trinums, mesh.ntriangs())
        .into_iter()
        .filter(|&t| {
            let tri = &triangs[t];
            !tri.iter().any(|n| pivots.contains(n))
                && !edge_codes(tri).iter().any(|c| ears.contains(c))
        })
        .collect()
}

/// Centre triangles of the targets in local midpoint numbering.
struct CoreStage {
    /// `triangs[r] = [m01, m12, m20]` of target `r`.
    triangs: Vec<Triangle>,
    points: Vec<Point2>,
    /// Edge end points each midpoint was created from.
    hosts: Vec<[usize; 2]>,
    /// Source triangle of every target row.
    parents: Vec<Triangle>,
}

impl CoreStage {
    fn new(mesh: &TriMesh, targets: &[usize]) -> Self {
        let parents: Vec<Triangle> = targets.iter().map(|&t| mesh.triangs()[t]).collect();
        let codes: Vec<[u64; 3]> = parents.iter().map(edge_codes).collect();
        let triangs = norm_table(&codes);
        let nmid = triangs.iter().flatten().max().map_or(0, |&m| m + 1);
        let mut hosts = vec![None; nmid];
        for (r, tri) in triangs.iter().enumerate() {
            for (l, &m) in tri.iter().enumerate() {
                if hosts[m].is_none() {
                    hosts[m] = Some([parents[r][l], parents[r][(l + 1) % 3]]);
                }
            }
        }
        let hosts: Vec<[usize; 2]> = hosts.into_iter().flatten().collect();
        let points = hosts
            .iter()
            .map(|&[a, b]| Point2::midpoint(mesh.point(a), mesh.point(b)))
            .collect();
        Self {
            triangs,
            points,
            hosts,
            parents,
        }
    }

    /// Source images of every alpha node.
    fn alpha_images(&self, npoints: usize) -> Vec<[usize; 2]> {
        (0..npoints)
            .map(|i| [i, i])
            .chain(self.hosts.iter().copied())
            .collect()
    }
}

fn alpha_mesh(mesh: &TriMesh, targets: &[usize], core: &CoreStage) -> TriMesh {
    let np = mesh.npoints();
    let kernels: Vec<Triangle> = core.triangs.iter().map(|t| t.map(|m| m + np)).collect();
    let mut triangs = kernels.clone();
    for (l, side) in [(0usize, 1usize), (1, 2), (2, 0)] {
        triangs.extend(
            kernels
                .iter()
                .zip(&core.parents)
                .map(|(k, v)| [k[l], v[side], k[(l + 1) % 3]]),
        );
    }
    // midpoints used by a single target get a void towards the neighbour
    let table = TableMap::from_rows(&core.triangs);
    triangs.extend(table.at_rank(1).map(|g| {
        let e = g[0];
        let host = core.parents[e.row];
        [host[e.col], host[(e.col + 1) % 3], e.value + np]
    }));
    mesh.deltriangs(targets)
        .add_points(&core.points)
        .add_triangs(&triangs)
}

struct BetaStage {
    mesh: TriMesh,
    /// `beta2alpha[beta node] = alpha node`.
    beta2alpha: Vec<usize>,
}

impl BetaStage {
    fn new(alpha: &TriMesh, tol: f64) -> Self {
        let voids = find_voids(alpha, tol);
        let boundary: HashSet<u64> = alpha.meshedge().codes().into_iter().collect();
        let codes: Vec<u64> = voids.iter().map(|v| sympaired(v.west, v.east)).collect();

        let mut dropped: Vec<usize> = voids
            .iter()
            .zip(&codes)
            .filter(|(_, c)| boundary.contains(*c))
            .map(|(v, _)| v.trinum)
            .collect();
        let mut keep_pivots = Vec::new();
        let mut merge_pivots = Vec::new();
        for g in TableMap::from_column(&codes).at_rank(2) {
            let (a, b) = (voids[g[0].row], voids[g[1].row]);
            dropped.extend([a.trinum, b.trinum]);
            keep_pivots.push(a.pivot.min(b.pivot));
            merge_pivots.push(a.pivot.max(b.pivot));
        }
        let mesh = alpha.deltriangs(&dropped);
        if merge_pivots.is_empty() {
            return Self {
                beta2alpha: (0..mesh.npoints()).collect(),
                mesh,
            };
        }
        log::debug!("refine: merged {} twin voids", merge_pivots.len());
        let cleaned = mesh.relabeled(&merge_pivots, &keep_pivots).delghosts();
        Self {
            mesh: cleaned.mesh,
            beta2alpha: cleaned.old_nodes,
        }
    }
}
