//! Joining two meshes along a shared boundary.

use hashbrown::HashMap;

use crate::config::AmrConfig;
use crate::geometry::Point2;
use crate::topology::trimesh::TriMesh;

fn snapped(p: Point2, tol: f64) -> (i64, i64) {
    ((p.x / tol).round() as i64, (p.y / tol).round() as i64)
}

/// Glue `mesh2` onto `mesh1` where their boundary nodes coincide within `tol`.
///
/// Points of `mesh2` follow those of `mesh1`; every glued node of `mesh1`
/// is replaced by its twin in `mesh2`, and unused points are dropped.
/// Returns `None` when the boundaries share no node.
pub fn join_meshes(mesh1: &TriMesh, mesh2: &TriMesh, tol: f64) -> Option<TriMesh> {
    let shift = mesh1.npoints();
    let mut boundary2: HashMap<(i64, i64), usize> = HashMap::new();
    for n in mesh2.meshedge().nodnums1() {
        boundary2.entry(snapped(mesh2.point(n), tol)).or_insert(n);
    }
    let mut seen = HashMap::new();
    for n in mesh1.meshedge().nodnums1() {
        let key = snapped(mesh1.point(n), tol);
        if let Some(&twin) = boundary2.get(&key) {
            seen.entry(key).or_insert((n, twin + shift));
        }
    }
    if seen.is_empty() {
        return None;
    }
    let (from, to): (Vec<usize>, Vec<usize>) = seen.into_values().unzip();
    log::debug!("join_meshes: {} twin nodes", from.len());

    let shifted: Vec<_> = mesh2
        .triangs()
        .iter()
        .map(|t| t.map(|n| n + shift))
        .collect();
    let joined = mesh1
        .add_points(mesh2.points())
        .add_triangs(&shifted)
        .relabeled(&from, &to);
    Some(joined.delghosts().mesh)
}

/// [`join_meshes`] with the configured glue tolerance.
pub fn join_meshes_with(mesh1: &TriMesh, mesh2: &TriMesh, config: &AmrConfig) -> Option<TriMesh> {
    join_meshes(mesh1, mesh2, config.glue_tol)
}
