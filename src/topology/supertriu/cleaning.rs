//! Cleaning steps that turn a raw supertriangulation into a compact cluster.

use hashbrown::HashSet;

use super::SuperTriu;
use crate::algs::dual_graph::DualGraph;
use crate::config::MIN_REDUCED_SIZE;
use crate::geometry::Point2;

impl SuperTriu {
    /// Drop rows that are links (two shared edges) of the supermesh.
    pub fn strip(&self) -> SuperTriu {
        let links = self.supmesh().edgesmap().getspec().links;
        self.deltriangs(&links)
    }

    fn smooth_once(&self) -> SuperTriu {
        let spec = self.supmesh().edgesmap().getspec();
        let mut drop = spec.spots;
        drop.extend(spec.heads);
        self.deltriangs(&drop)
    }

    /// Drop spots and heads of the supermesh.
    ///
    /// With `iterate`, repeat until nothing changes, the rows run out, or as
    /// many passes as the initial size have been made.
    pub fn smooth(&self, iterate: bool) -> SuperTriu {
        let mut cur = self.smooth_once();
        if iterate {
            let mut passes = 1;
            while passes < self.size() && !cur.is_empty() {
                let next = cur.smooth_once();
                if next.size() == cur.size() {
                    break;
                }
                cur = next;
                passes += 1;
            }
        }
        cur
    }

    /// Drop rows whose supertriangle touches the background boundary.
    pub fn detach(&self) -> SuperTriu {
        let boundary: HashSet<usize> = self.mesh().meshedge().nodnums_unique().into_iter().collect();
        self.filter_rows(|r| !r.vertices.iter().any(|n| boundary.contains(n)))
    }

    /// Connected, compact part reachable from the seed row.
    ///
    /// The seed is the row closest to `seed` (row 0 without an anchor).
    pub fn compress(&self, seed: Option<Point2>) -> Option<SuperTriu> {
        self.compress_with(seed, MIN_REDUCED_SIZE)
    }

    /// [`compress`](Self::compress) with an explicit minimum size.
    pub fn compress_with(&self, seed: Option<Point2>, min_size: usize) -> Option<SuperTriu> {
        if self.is_empty() {
            return None;
        }
        let start = seed.and_then(|p| self.find_seed(p)).unwrap_or(0);
        let order = DualGraph::from_mesh(&self.supmesh()).bfs_order(start);
        if order.len() < min_size {
            return None;
        }
        let sub = self.subtriu(&order);
        sub.is_compact().then_some(sub)
    }

    /// Alternate `compress` with `strip` + `smooth` until a compact cluster
    /// appears or the rows run out.
    pub fn reduce(&self, seed: Option<Point2>) -> Option<SuperTriu> {
        self.reduce_with(seed, MIN_REDUCED_SIZE)
    }

    /// [`reduce`](Self::reduce) with an explicit minimum size.
    pub fn reduce_with(&self, seed: Option<Point2>, min_size: usize) -> Option<SuperTriu> {
        let mut cur = self.clone();
        for _ in 0..self.size() {
            if cur.is_empty() {
                return None;
            }
            if let Some(found) = cur.compress_with(seed, min_size) {
                return Some(found);
            }
            cur = cur.strip().smooth(true);
        }
        log::debug!("reduce: no compact cluster among {} rows", self.size());
        None
    }
}
