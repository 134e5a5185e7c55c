//! Node-field transport from a mesh to its refinement.

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::AmrError;

/// Maps node data of a source mesh onto a refined mesh.
///
/// Every refined node has an image `[a, b]` in the source mesh and receives
/// `0.5 * (data[a] + data[b])`. Nodes inherited from the source have `a == b`
/// (masters); new edge midpoints have `a != b` (slaves).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataRefiner {
    nodes_images: Vec<[usize; 2]>,
    source_len: usize,
}

impl DataRefiner {
    pub fn new(nodes_images: Vec<[usize; 2]>, source_len: usize) -> Self {
        let refiner = Self {
            nodes_images,
            source_len,
        };
        refiner.debug_assert_invariants();
        refiner
    }

    /// Refiner of an unchanged mesh.
    pub fn identity(len: usize) -> Self {
        Self::new((0..len).map(|i| [i, i]).collect(), len)
    }

    pub fn nodes_images(&self) -> &[[usize; 2]] {
        &self.nodes_images
    }

    /// Number of nodes of the refined mesh.
    pub fn len(&self) -> usize {
        self.nodes_images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes_images.is_empty()
    }

    /// Number of nodes of the source mesh.
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// Refined nodes copied from a single source node.
    pub fn master_nodes(&self) -> Vec<usize> {
        self.nodes_images
            .iter()
            .enumerate()
            .filter_map(|(i, [a, b])| (a == b).then_some(i))
            .collect()
    }

    /// Refined nodes interpolated between two source nodes.
    pub fn slave_nodes(&self) -> Vec<usize> {
        self.nodes_images
            .iter()
            .enumerate()
            .filter_map(|(i, [a, b])| (a != b).then_some(i))
            .collect()
    }

    /// Transport a node field of the source mesh.
    pub fn refine(&self, data: &[f64]) -> Result<Vec<f64>, AmrError> {
        if data.len() != self.source_len {
            return Err(AmrError::DataLengthMismatch {
                expected: self.source_len,
                found: data.len(),
            });
        }
        Ok(self
            .nodes_images
            .iter()
            .map(|&[a, b]| 0.5 * (data[a] + data[b]))
            .collect())
    }
}

impl DebugInvariants for DataRefiner {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "DataRefiner");
    }

    fn validate_invariants(&self) -> Result<(), AmrError> {
        match self.nodes_images.iter().flatten().find(|&&n| n >= self.source_len) {
            Some(&node) => Err(AmrError::NodeNotInMap(node)),
            None => Ok(()),
        }
    }
}
