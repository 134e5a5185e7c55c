//! Geometry utilities for trimesh-amr.
//!
//! This module provides the planar point type used by every mesh and the
//! handful of triangle metrics the adaptation pipelines rely on.

pub mod metrics;
pub mod point;

pub use point::Point2;
