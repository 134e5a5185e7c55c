//! Locating nodes and triangles of a mesh.

use crate::algs::dual_graph::DualGraph;
use crate::geometry::Point2;
use crate::mesh_error::AmrError;
use crate::topology::nodes_map::NodesMap;
use crate::topology::trimesh::TriMesh;

fn nearest(points: impl Iterator<Item = Point2>, anchor: Point2) -> Option<usize> {
    points
        .map(|p| p.dist(anchor))
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Nodes map of the point closest to `anchor`.
///
/// Fails when the closest point is not used by any triangle.
pub fn find_node(mesh: &TriMesh, anchor: Point2) -> Result<NodesMap, AmrError> {
    match nearest(mesh.points().iter().copied(), anchor) {
        Some(node) => mesh.nodesmap().atnode(node),
        None => Ok(NodesMap::default()),
    }
}

/// Up to `count` triangles reached breadth-first from the triangle whose
/// centroid is closest to `anchor` (triangle 0 without an anchor).
///
/// With `remove_heads`, triangles of the subset that share only one edge
/// with the rest of the subset are dropped.
pub fn find_subset(
    mesh: &TriMesh,
    count: usize,
    anchor: Option<Point2>,
    remove_heads: bool,
) -> Vec<usize> {
    if mesh.is_empty() {
        return Vec::new();
    }
    let seed = anchor
        .and_then(|p| nearest(mesh.centroids().into_iter(), p))
        .unwrap_or(0);
    let mut order = DualGraph::from_mesh(mesh).bfs_order(seed);
    order.truncate(count);
    if remove_heads {
        let heads = mesh.submesh(&order).edgesmap().getspec().heads;
        let mut keep = vec![true; order.len()];
        for h in heads {
            keep[h] = false;
        }
        order = order
            .into_iter()
            .zip(keep)
            .filter_map(|(t, k)| k.then_some(t))
            .collect();
    }
    order
}

/// Triangles whose centroid satisfies `mask`.
pub fn find_masked(mesh: &TriMesh, mask: impl Fn(Point2) -> bool) -> Vec<usize> {
    mesh.centroids()
        .into_iter()
        .enumerate()
        .filter_map(|(t, c)| mask(c).then_some(t))
        .collect()
}
