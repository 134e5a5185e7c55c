//! Mass mesh: the root mesh with every cluster replaced by its refined
//! supertriangle, fully hung on voids.
//!
//! Conservative transfer projects root data onto this mesh. Inside a
//! cluster the three kernel positions become fresh pivots `c` hanging on the
//! supertriangle sides, so the projected field is linear on each
//! supertriangle. Outside the clusters the mesh is the root mesh, with
//! voids added or removed along the cluster borders so that every pivot keeps
//! four triangles.

use hashbrown::{HashMap, HashSet};

use crate::config::VOID_TOL;
use crate::geometry::Point2;
use crate::topology::pairs::{TableMap, sympaired};
use crate::topology::supertriu::SuperTriu;
use crate::topology::trimesh::{TriMesh, Triangle};
use crate::topology::voids::find_voids;

/// Mass mesh of a set of clusters and its link to the root mesh.
#[derive(Clone, Debug)]
pub struct MassMesh {
    pub mesh: TriMesh,
    /// `root2mass[mass node] = root node` at the same position.
    pub root2mass: Vec<usize>,
}

impl MassMesh {
    /// Build the mass mesh of the clusters of `suptri` over its background mesh.
    pub fn new(suptri: &SuperTriu) -> Self {
        Self::with_tol(suptri, VOID_TOL)
    }

    pub fn with_tol(suptri: &SuperTriu, tol: f64) -> Self {
        let root = suptri.mesh();
        let np = root.npoints();
        let rows = suptri.rows();

        // supertriangle sides with the root kernel node as apex
        let alpha: Vec<Triangle> = rows
            .iter()
            .flat_map(|r| {
                let [s0, s1, s2] = r.vertices;
                let [k0, k1, k2] = root.triangs()[r.core];
                [[s0, s1, k1], [s1, s2, k2], [s2, s0, k0]]
            })
            .collect();

        let edge_nodes: HashSet<usize> = root.meshedge().nodnums_unique().into_iter().collect();
        let codes: Vec<u64> = alpha.iter().map(|t| sympaired(t[0], t[1])).collect();
        let hanging: Vec<Triangle> = TableMap::from_column(&codes)
            .at_rank(1)
            .map(|g| alpha[g[0].row])
            .filter(|t| !edge_nodes.contains(&t[2]))
            .collect();

        let root_voids: HashMap<usize, usize> = find_voids(root, tol)
            .into_iter()
            .map(|v| (v.pivot, v.trinum))
            .collect();
        let hanging_pivots: HashSet<usize> = hanging.iter().map(|t| t[2]).collect();
        let garbage: Vec<usize> = root_voids
            .iter()
            .filter(|(p, _)| hanging_pivots.contains(*p))
            .map(|(_, &t)| t)
            .collect();
        let outer_voids: Vec<Triangle> = hanging
            .iter()
            .filter(|t| !root_voids.contains_key(&t[2]))
            .map(|t| [t[1], t[0], t[2]])
            .collect();

        // fresh pivots np + i sit on the root kernel nodes alpha[i][2]
        let inner_voids: Vec<Triangle> = alpha
            .iter()
            .enumerate()
            .map(|(i, t)| [t[0], t[1], np + i])
            .collect();
        let inner_cores: Vec<Triangle> = (0..rows.len())
            .map(|r| [np + 3 * r, np + 3 * r + 1, np + 3 * r + 2])
            .collect();
        let mut inner_sides: Vec<Triangle> = Vec::with_capacity(3 * rows.len());
        for (corner, (a, b)) in [(0usize, (0usize, 2usize)), (1, (1, 0)), (2, (2, 1))] {
            inner_sides.extend(rows.iter().zip(&inner_cores).map(|(r, c)| {
                [r.vertices[corner], c[a], c[b]]
            }));
        }

        let mut dropped: Vec<usize> = suptri.supbodies().into_iter().flatten().collect();
        dropped.extend(garbage);
        let new_points: Vec<Point2> = alpha.iter().map(|t| root.point(t[2])).collect();
        let mut triangs = inner_voids;
        triangs.extend(inner_cores);
        triangs.extend(inner_sides);
        triangs.extend(outer_voids);
        let gamma = root
            .deltriangs(&dropped)
            .add_points(&new_points)
            .add_triangs(&triangs);

        let cleaned = gamma.delghosts();
        let root2gamma: Vec<usize> = (0..np).chain(alpha.iter().map(|t| t[2])).collect();
        let root2mass = cleaned.old_nodes.iter().map(|&g| root2gamma[g]).collect();
        log::debug!(
            "mass mesh: {} clusters, {} triangles, {} nodes",
            rows.len(),
            cleaned.mesh.ntriangs(),
            cleaned.mesh.npoints()
        );
        Self {
            mesh: cleaned.mesh,
            root2mass,
        }
    }
}
