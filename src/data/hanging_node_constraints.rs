//! Hanging node constraints: pivot values tied to their edge end points.
//!
//! Every void `[west, east, pivot]` constrains the node field so that
//! `data[pivot] == 0.5 * (data[west] + data[east])`. Pivots may themselves be
//! the west or east node of another void; such chains are resolved to
//! weights on unconstrained (master) nodes.

use std::collections::BTreeMap;

use crate::config::VOID_TOL;
use crate::mesh_error::AmrError;
use crate::topology::trimesh::TriMesh;
use crate::topology::voids::find_voids;

/// A linear term referencing a master node with a weight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearConstraintTerm {
    /// Master node providing the value.
    pub node: usize,
    /// Weight applied to the master value.
    pub weight: f64,
}

/// Stores the `pivot -> (west, east)` constraints of a mesh.
#[derive(Clone, Debug, Default)]
pub struct HangingNodeConstraints {
    constraints: BTreeMap<usize, (usize, usize)>,
}

impl HangingNodeConstraints {
    /// Collect the constraints of every void of `mesh`.
    pub fn from_mesh(mesh: &TriMesh, tol: f64) -> Self {
        let constraints = find_voids(mesh, tol)
            .into_iter()
            .map(|v| (v.pivot, (v.west, v.east)))
            .collect();
        Self { constraints }
    }

    /// Borrow the constraint map.
    pub fn constraints(&self) -> &BTreeMap<usize, (usize, usize)> {
        &self.constraints
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Constrained nodes in ascending order.
    pub fn pivots(&self) -> Vec<usize> {
        self.constraints.keys().copied().collect()
    }

    pub fn is_pivot(&self, node: usize) -> bool {
        self.constraints.contains_key(&node)
    }

    /// Insert or update the constraint of a pivot.
    pub fn insert_constraint(&mut self, pivot: usize, west: usize, east: usize) {
        self.constraints.insert(pivot, (west, east));
    }

    /// Express `node` as a combination of master nodes.
    ///
    /// A master resolves to itself with weight one.
    pub fn resolve(&self, node: usize) -> Result<Vec<LinearConstraintTerm>, AmrError> {
        let mut memo = BTreeMap::new();
        self.resolve_into(node, &mut memo, &mut Vec::new())
    }

    /// Master weights of every pivot.
    pub fn resolve_all(&self) -> Result<BTreeMap<usize, Vec<LinearConstraintTerm>>, AmrError> {
        let mut memo = BTreeMap::new();
        for &pivot in self.constraints.keys() {
            self.resolve_into(pivot, &mut memo, &mut Vec::new())?;
        }
        Ok(memo)
    }

    fn resolve_into(
        &self,
        node: usize,
        memo: &mut BTreeMap<usize, Vec<LinearConstraintTerm>>,
        stack: &mut Vec<usize>,
    ) -> Result<Vec<LinearConstraintTerm>, AmrError> {
        let Some(&(west, east)) = self.constraints.get(&node) else {
            return Ok(vec![LinearConstraintTerm { node, weight: 1.0 }]);
        };
        if let Some(terms) = memo.get(&node) {
            return Ok(terms.clone());
        }
        if stack.contains(&node) {
            return Err(AmrError::ConstraintCycle(node));
        }
        stack.push(node);
        let mut acc: BTreeMap<usize, f64> = BTreeMap::new();
        for parent in [west, east] {
            for term in self.resolve_into(parent, memo, stack)? {
                *acc.entry(term.node).or_insert(0.0) += 0.5 * term.weight;
            }
        }
        stack.pop();
        let terms: Vec<_> = acc
            .into_iter()
            .map(|(node, weight)| LinearConstraintTerm { node, weight })
            .collect();
        memo.insert(node, terms.clone());
        Ok(terms)
    }

    /// Overwrite every pivot value from the master values.
    pub fn apply(&self, data: &mut [f64]) -> Result<(), AmrError> {
        let resolved = self.resolve_all()?;
        let mut updates = Vec::with_capacity(resolved.len());
        for (pivot, terms) in &resolved {
            if *pivot >= data.len() {
                return Err(AmrError::DataLengthMismatch {
                    expected: pivot + 1,
                    found: data.len(),
                });
            }
            let mut value = 0.0;
            for term in terms {
                let source = data.get(term.node).ok_or(AmrError::DataLengthMismatch {
                    expected: term.node + 1,
                    found: data.len(),
                })?;
                value += source * term.weight;
            }
            updates.push((*pivot, value));
        }
        for (pivot, value) in updates {
            data[pivot] = value;
        }
        Ok(())
    }
}

/// Copy of `data` with every void constraint enforced.
pub fn constr_data(mesh: &TriMesh, data: &[f64]) -> Result<Vec<f64>, AmrError> {
    if data.len() != mesh.npoints() {
        return Err(AmrError::DataLengthMismatch {
            expected: mesh.npoints(),
            found: data.len(),
        });
    }
    let mut out = data.to_vec();
    HangingNodeConstraints::from_mesh(mesh, VOID_TOL).apply(&mut out)?;
    Ok(out)
}
