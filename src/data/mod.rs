//! Node data transport across mesh changes.
//!
//! Refinement carries fields with a [`DataRefiner`]; coarsening with a
//! [`DataCollector`] built on mass operators from a
//! [`MassOperatorProvider`](mass::MassOperatorProvider).

pub mod collector;
pub mod hanging_node_constraints;
pub mod mass;
pub mod refiner;

pub use collector::DataCollector;
pub use hanging_node_constraints::{HangingNodeConstraints, LinearConstraintTerm, constr_data};
pub use mass::{LumpedMassProvider, MassOperatorProvider, MassOperators};
pub use refiner::DataRefiner;
