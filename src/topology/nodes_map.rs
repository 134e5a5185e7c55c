//! Node-to-triangle incidence.

use crate::mesh_error::AmrError;
use crate::topology::pairs::TableMap;
use crate::topology::trimesh::TriMesh;

/// One occurrence of a node in a triangle.
///
/// `nodnum1` and `nodnum2` are the next two corners counter-clockwise, so the
/// occurrence describes the triangle `[nodnum, nodnum1, nodnum2]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeEntry {
    pub nodnum: usize,
    pub trinum: usize,
    pub locnum: usize,
    pub nodnum1: usize,
    pub nodnum2: usize,
}

/// Every node occurrence of a mesh, grouped by node number.
#[derive(Clone, Debug, Default)]
pub struct NodesMap {
    entries: Vec<NodeEntry>,
    nodes: Vec<usize>,
    starts: Vec<usize>,
}

impl NodesMap {
    pub fn from_mesh(mesh: &TriMesh) -> Self {
        let table = TableMap::from_rows(mesh.triangs());
        let mut entries = Vec::with_capacity(table.len());
        let mut starts = Vec::with_capacity(table.ngroups() + 1);
        let nodes = table.values();
        for group in table.groups() {
            starts.push(entries.len());
            entries.extend(group.iter().map(|e| {
                let tri = mesh.triangs()[e.row];
                NodeEntry {
                    nodnum: e.value,
                    trinum: e.row,
                    locnum: e.col,
                    nodnum1: tri[(e.col + 1) % 3],
                    nodnum2: tri[(e.col + 2) % 3],
                }
            }));
        }
        starts.push(entries.len());
        Self {
            entries,
            nodes,
            starts,
        }
    }

    fn from_group(entries: &[NodeEntry]) -> Self {
        Self {
            entries: entries.to_vec(),
            nodes: entries.first().map(|e| e.nodnum).into_iter().collect(),
            starts: vec![0, entries.len()],
        }
    }

    /// Number of occurrences.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[NodeEntry] {
        &self.entries
    }

    pub fn nodnums(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.nodnum).collect()
    }

    pub fn trinums(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.trinum).collect()
    }

    pub fn locnums(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.locnum).collect()
    }

    pub fn nodnums1(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.nodnum1).collect()
    }

    pub fn nodnums2(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.nodnum2).collect()
    }

    fn groups(&self) -> impl Iterator<Item = &[NodeEntry]> + '_ {
        self.starts.windows(2).map(move |w| &self.entries[w[0]..w[1]])
    }

    /// Sorted unique node numbers.
    pub fn nodes_range(&self) -> Vec<usize> {
        self.nodes.clone()
    }

    /// Number of triangles around each node of [`nodes_range`](Self::nodes_range).
    pub fn nodes_ranks(&self) -> Vec<usize> {
        self.groups().map(<[NodeEntry]>::len).collect()
    }

    fn group_of(&self, node: usize) -> Option<&[NodeEntry]> {
        let idx = self.nodes.binary_search(&node).ok()?;
        Some(&self.entries[self.starts[idx]..self.starts[idx + 1]])
    }

    /// Occurrences of `node`; empty when the node is not referenced.
    pub fn occurrences(&self, node: usize) -> &[NodeEntry] {
        self.group_of(node).unwrap_or(&[])
    }

    /// Number of triangles around `node` (0 when absent).
    pub fn rank_of(&self, node: usize) -> usize {
        self.occurrences(node).len()
    }

    /// Map restricted to the occurrences of `node`.
    pub fn atnode(&self, node: usize) -> Result<NodesMap, AmrError> {
        self.group_of(node)
            .map(NodesMap::from_group)
            .ok_or(AmrError::NodeNotInMap(node))
    }
}

impl TriMesh {
    pub fn nodesmap(&self) -> NodesMap {
        NodesMap::from_mesh(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point2;

    #[test]
    fn ranks_and_lookup() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
            Point2::new(9.0, 9.0),
        ];
        let mesh = TriMesh::from_data(points, vec![[0, 1, 2], [2, 3, 0]]).unwrap();
        let map = mesh.nodesmap();
        assert_eq!(map.nodes_range(), vec![0, 1, 2, 3]);
        assert_eq!(map.nodes_ranks(), vec![2, 1, 2, 1]);
        let at0 = map.atnode(0).unwrap();
        assert_eq!(at0.trinums(), vec![0, 1]);
        assert_eq!(at0.nodnums1(), vec![1, 2]);
        assert_eq!(at0.nodnums2(), vec![2, 3]);
        assert_eq!(map.rank_of(4), 0);
        assert_eq!(map.atnode(4).unwrap_err(), AmrError::NodeNotInMap(4));
    }
}
