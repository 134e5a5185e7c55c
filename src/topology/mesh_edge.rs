//! Boundary edges and boundary loops.

use hashbrown::HashMap;
use itertools::Itertools;

use crate::geometry::Point2;
use crate::mesh_error::AmrError;
use crate::topology::pairs::TableMap;
use crate::topology::trimesh::TriMesh;

/// A local triangle edge that no other triangle shares.
///
/// The edge runs `start -> end` in the owning triangle's orientation; `apex`
/// is the opposite corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryEdge {
    pub code: u64,
    pub trinum: usize,
    pub locnum: usize,
    pub start: usize,
    pub end: usize,
    pub apex: usize,
}

/// All boundary edges of a mesh, ordered by edge code.
#[derive(Clone, Debug, Default)]
pub struct MeshEdge {
    edges: Vec<BoundaryEdge>,
}

impl MeshEdge {
    pub fn from_mesh(mesh: &TriMesh) -> Self {
        let table = TableMap::from_rows(&mesh.edges_paired());
        let edges = table
            .at_rank(1)
            .map(|g| {
                let (trinum, locnum) = (g[0].row, g[0].col);
                let tri = mesh.triangs()[trinum];
                BoundaryEdge {
                    code: g[0].value,
                    trinum,
                    locnum,
                    start: tri[locnum],
                    end: tri[(locnum + 1) % 3],
                    apex: tri[(locnum + 2) % 3],
                }
            })
            .collect();
        Self { edges }
    }

    pub fn size(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edges(&self) -> &[BoundaryEdge] {
        &self.edges
    }

    pub fn codes(&self) -> Vec<u64> {
        self.edges.iter().map(|e| e.code).collect()
    }

    pub fn trinums(&self) -> Vec<usize> {
        self.edges.iter().map(|e| e.trinum).collect()
    }

    pub fn locnums(&self) -> Vec<usize> {
        self.edges.iter().map(|e| e.locnum).collect()
    }

    /// Start nodes.
    pub fn nodnums1(&self) -> Vec<usize> {
        self.edges.iter().map(|e| e.start).collect()
    }

    /// End nodes.
    pub fn nodnums2(&self) -> Vec<usize> {
        self.edges.iter().map(|e| e.end).collect()
    }

    /// Opposite corners.
    pub fn nodnums3(&self) -> Vec<usize> {
        self.edges.iter().map(|e| e.apex).collect()
    }

    /// Sorted unique boundary nodes.
    pub fn nodnums_unique(&self) -> Vec<usize> {
        self.edges
            .iter()
            .flat_map(|e| [e.start, e.end])
            .sorted_unstable()
            .dedup()
            .collect()
    }

    /// Sorted unique triangles owning a boundary edge.
    pub fn trinums_unique(&self) -> Vec<usize> {
        self.edges
            .iter()
            .map(|e| e.trinum)
            .sorted_unstable()
            .dedup()
            .collect()
    }

    /// End-point positions of every edge.
    pub fn edges2d(&self, mesh: &TriMesh) -> Vec<(Point2, Point2)> {
        self.edges
            .iter()
            .map(|e| (mesh.point(e.start), mesh.point(e.end)))
            .collect()
    }

    /// First start node shared by two boundary edges, if any.
    fn first_intersection(&self) -> Option<usize> {
        self.edges.iter().map(|e| e.start).duplicates().min()
    }

    /// True when two boundary edges start at the same node.
    pub fn has_intersects(&self) -> bool {
        self.first_intersection().is_some()
    }

    /// Split the boundary into closed loops.
    ///
    /// Each loop starts with the first unvisited edge in code order and
    /// follows the edge whose start is the current end.
    pub fn getloops(&self) -> Result<Vec<EdgeLoop>, AmrError> {
        if let Some(node) = self.first_intersection() {
            return Err(AmrError::BoundaryIntersection(node));
        }
        let by_start: HashMap<usize, usize> = self
            .edges
            .iter()
            .enumerate()
            .map(|(i, e)| (e.start, i))
            .collect();
        let mut visited = vec![false; self.edges.len()];
        let mut loops = Vec::new();
        for first in 0..self.edges.len() {
            if visited[first] {
                continue;
            }
            let origin = self.edges[first].start;
            let mut edges = Vec::new();
            let mut cur = first;
            loop {
                visited[cur] = true;
                edges.push(self.edges[cur]);
                let end = self.edges[cur].end;
                if end == origin {
                    break;
                }
                cur = *by_start.get(&end).ok_or(AmrError::OpenBoundary(origin))?;
                if visited[cur] {
                    return Err(AmrError::OpenBoundary(origin));
                }
            }
            loops.push(EdgeLoop { edges });
        }
        Ok(loops)
    }

    pub fn sort_per_trinum(&self) -> MeshEdge {
        let mut edges = self.edges.clone();
        edges.sort_by_key(|e| (e.trinum, e.locnum));
        MeshEdge { edges }
    }

    pub fn sort_per_nodnum(&self) -> MeshEdge {
        let mut edges = self.edges.clone();
        edges.sort_by_key(|e| e.start);
        MeshEdge { edges }
    }
}

/// A closed chain of boundary edges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeLoop {
    edges: Vec<BoundaryEdge>,
}

impl EdgeLoop {
    pub fn size(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[BoundaryEdge] {
        &self.edges
    }

    /// Start nodes in walking order.
    pub fn nodnums(&self) -> Vec<usize> {
        self.edges.iter().map(|e| e.start).collect()
    }

    /// First node of the walk; `None` for an empty loop.
    pub fn startnode(&self) -> Option<usize> {
        self.edges.first().map(|e| e.start)
    }

    pub fn contains(&self, node: usize) -> bool {
        self.edges.iter().any(|e| e.start == node)
    }

    /// Rotate so that edge `index` comes first; the index is clamped to the
    /// last edge.
    pub fn synctoedge(&self, index: usize) -> EdgeLoop {
        let mut edges = self.edges.clone();
        if let Some(last) = edges.len().checked_sub(1) {
            edges.rotate_left(index.min(last));
        }
        EdgeLoop { edges }
    }

    /// Rotate so that the edge starting at `node` comes first.
    pub fn synctonode(&self, node: usize) -> Result<EdgeLoop, AmrError> {
        let index = self
            .edges
            .iter()
            .position(|e| e.start == node)
            .ok_or(AmrError::NodeNotOnLoop(node))?;
        Ok(self.synctoedge(index))
    }
}

impl TriMesh {
    pub fn meshedge(&self) -> MeshEdge {
        MeshEdge::from_mesh(self)
    }
}
