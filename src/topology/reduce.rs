//! Static mesh reduction: replace a compact cluster of supertriangles by
//! the coarse triangles it came from.
//!
//! The coarse *inner* mesh (the supermesh) is stitched back onto the *outer*
//! mesh (everything but the supertriangle bodies) with one void per inner
//! boundary edge. The outer mesh must have exactly two boundary loops, the
//! hole running along the inner loop at twice its resolution.

use hashbrown::HashMap;

use crate::geometry::Point2;
use crate::topology::supertriu::SuperTriu;
use crate::topology::trimesh::{TriMesh, Triangle};

impl TriMesh {
    /// Coarsen the largest compact cluster reachable from the first
    /// supertriangle.
    ///
    /// With `detach`, supertriangles touching the boundary are dropped
    /// first. The cluster is then shrunk by `shrink` strip/smooth passes.
    /// The mesh comes back unchanged when no cluster survives or the inner
    /// and outer parts cannot be stitched.
    pub fn reduced(&self, shrink: usize, detach: bool) -> TriMesh {
        self.reduced_from(None, shrink, detach)
    }

    /// [`reduced`](Self::reduced) with the cluster seeded nearest to `seed`.
    pub fn reduced_from(&self, seed: Option<Point2>, shrink: usize, detach: bool) -> TriMesh {
        let mut suptri = self.supertriu();
        if detach {
            suptri = suptri.detach();
        }
        let Some(mut suptri) = suptri.reduce(seed) else {
            log::debug!("reduced: no compact cluster");
            return self.clone();
        };
        for _ in 0..shrink {
            suptri = suptri.strip().smooth(true);
        }
        if suptri.is_empty() {
            log::debug!("reduced: cluster vanished after {shrink} shrink passes");
            return self.clone();
        }
        merge_cluster(&suptri).unwrap_or_else(|| {
            log::debug!("reduced: cannot stitch {} supertriangles", suptri.size());
            self.clone()
        })
    }
}

fn merge_cluster(suptri: &SuperTriu) -> Option<TriMesh> {
    let inner = suptri.supmesh();
    let bodies: Vec<usize> = suptri.supbodies().into_iter().flatten().collect();
    let outer = suptri.mesh().deltriangs(&bodies);
    if outer.is_empty() {
        return Some(inner.delghosts().mesh);
    }

    let iloops = inner.meshedge().getloops().ok()?;
    let oloops = outer.meshedge().getloops().ok()?;
    let [iloop] = iloops.as_slice() else {
        return None;
    };
    if oloops.len() != 2 {
        return None;
    }
    let anchor = iloop.startnode()?;
    let hole = oloops.iter().find(|l| l.contains(anchor))?;
    if hole.size() != 2 * iloop.size() {
        return None;
    }

    // the hole runs against the inner loop: end -> pivot -> start
    let next: HashMap<usize, usize> = hole.edges().iter().map(|e| (e.start, e.end)).collect();
    let mut points = outer.points().to_vec();
    let mut voids: Vec<Triangle> = Vec::with_capacity(iloop.size());
    for e in iloop.edges() {
        let pivot = *next.get(&e.end)?;
        if next.get(&pivot) != Some(&e.start) {
            return None;
        }
        points[pivot] = Point2::midpoint(points[e.start], points[e.end]);
        voids.push([e.end, e.start, pivot]);
    }

    let mut triangs = inner.triangs().to_vec();
    triangs.extend(voids);
    triangs.extend_from_slice(outer.triangs());
    Some(TriMesh::from_parts(points, triangs).delghosts().mesh)
}
