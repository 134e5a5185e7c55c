//! Triangle metrics.
//!
//! Triangles are `[v0, v1, v2]`, counter-clockwise for positive area. A
//! *void* is a degenerate triangle whose third vertex is the midpoint of the
//! first two.

use super::point::Point2;

/// Signed area of `[a, b, c]` (positive when counter-clockwise).
#[inline]
pub fn signed_area(a: Point2, b: Point2, c: Point2) -> f64 {
    0.5 * (b - a).cross(c - a)
}

/// Centroid of `[a, b, c]`.
#[inline]
pub fn centroid(a: Point2, b: Point2, c: Point2) -> Point2 {
    (a + b + c) * (1.0 / 3.0)
}

/// True when `pivot` lies within `tol` of the midpoint of `west`/`east`.
#[inline]
pub fn is_midpoint(west: Point2, east: Point2, pivot: Point2, tol: f64) -> bool {
    (pivot - Point2::midpoint(west, east)).norm() < tol
}

/// Length of the longest side; used as the triangle scale.
pub fn longest_side(a: Point2, b: Point2, c: Point2) -> f64 {
    a.dist(b).max(b.dist(c)).max(c.dist(a))
}
