//! Internal edges and the triangle classification derived from them.
//!
//! An internal edge is an edge code shared by exactly two triangles. Counting
//! how many internal edges each triangle has gives the classification used by
//! the supertriangulation cleaning steps:
//!
//! | internal edges | class |
//! |----------------|-------|
//! | 0              | spot  |
//! | 1              | head  |
//! | 2              | link  |
//! | 3              | core  |

use crate::topology::pairs::TableMap;
use crate::topology::trimesh::TriMesh;

/// An edge shared by two triangles.
///
/// `trinum1` is the triangle that comes first in row-major order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InnerEdge {
    pub code: u64,
    pub trinum1: usize,
    pub locnum1: usize,
    pub trinum2: usize,
    pub locnum2: usize,
}

/// Triangle numbers per class, each sorted ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgesSpec {
    pub spots: Vec<usize>,
    pub heads: Vec<usize>,
    pub links: Vec<usize>,
    pub cores: Vec<usize>,
}

/// Internal edges of a mesh, sorted by edge code.
#[derive(Clone, Debug, Default)]
pub struct EdgesMap {
    edges: Vec<InnerEdge>,
    ntriangs: usize,
}

impl EdgesMap {
    pub fn from_mesh(mesh: &TriMesh) -> Self {
        let table = TableMap::from_rows(&mesh.edges_paired());
        let edges = table
            .at_rank(2)
            .map(|g| InnerEdge {
                code: g[0].value,
                trinum1: g[0].row,
                locnum1: g[0].col,
                trinum2: g[1].row,
                locnum2: g[1].col,
            })
            .collect();
        Self {
            edges,
            ntriangs: mesh.ntriangs(),
        }
    }

    pub fn size(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edges(&self) -> &[InnerEdge] {
        &self.edges
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InnerEdge> {
        self.edges.iter()
    }

    pub fn trinums1(&self) -> Vec<usize> {
        self.edges.iter().map(|e| e.trinum1).collect()
    }

    pub fn trinums2(&self) -> Vec<usize> {
        self.edges.iter().map(|e| e.trinum2).collect()
    }

    pub fn locnums1(&self) -> Vec<usize> {
        self.edges.iter().map(|e| e.locnum1).collect()
    }

    pub fn locnums2(&self) -> Vec<usize> {
        self.edges.iter().map(|e| e.locnum2).collect()
    }

    /// Number of internal edges of every triangle.
    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.ntriangs];
        for e in &self.edges {
            counts[e.trinum1] += 1;
            counts[e.trinum2] += 1;
        }
        counts
    }

    /// Classify triangles by their number of internal edges.
    pub fn getspec(&self) -> EdgesSpec {
        let mut spec = EdgesSpec::default();
        for (trinum, count) in self.counts().into_iter().enumerate() {
            match count {
                0 => spec.spots.push(trinum),
                1 => spec.heads.push(trinum),
                2 => spec.links.push(trinum),
                _ => spec.cores.push(trinum),
            }
        }
        spec
    }

    /// Same edges ordered by `trinum1` (stable).
    pub fn sort_per_trinum(&self) -> EdgesMap {
        let mut edges = self.edges.clone();
        edges.sort_by_key(|e| e.trinum1);
        EdgesMap {
            edges,
            ntriangs: self.ntriangs,
        }
    }
}

impl TriMesh {
    pub fn edgesmap(&self) -> EdgesMap {
        EdgesMap::from_mesh(self)
    }
}
