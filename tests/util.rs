#![allow(dead_code)]
use trimesh_amr::config::VOID_TOL;
use trimesh_amr::data::mass::lumped_total;
use trimesh_amr::geometry::Point2;
use trimesh_amr::mesh_generation::{GridKind, trigrid};
use trimesh_amr::topology::TriMesh;

/// Interior triangle of `grid4()`: cell (1, 1), lower half.
pub const INTERIOR: usize = 8;

/// 4 × 4 node east-slope grid: 16 points, 18 triangles.
pub fn grid4() -> TriMesh {
    trigrid(4, 4, GridKind::EastSlope)
}

pub fn linear(x: f64, y: f64) -> f64 {
    1.5 * x - 0.25 * y + 2.0
}

pub fn bumpy(x: f64, y: f64) -> f64 {
    (x * y).sin() + x * x
}

/// Values of `f` at every point of `mesh`.
pub fn sample(mesh: &TriMesh, f: impl Fn(f64, f64) -> f64) -> Vec<f64> {
    mesh.points().iter().map(|p| f(p.x, p.y)).collect()
}

pub fn total(mesh: &TriMesh, data: &[f64]) -> f64 {
    lumped_total(mesh, data, VOID_TOL).expect("lumped total of a valid mesh")
}

/// Assert every void of `mesh` carries the mean of its end values.
pub fn assert_void_constraints(mesh: &TriMesh, data: &[f64]) {
    for v in mesh.voids() {
        let want = 0.5 * (data[v.west] + data[v.east]);
        assert!(
            (data[v.pivot] - want).abs() < 1e-12,
            "pivot {} holds {} instead of {}",
            v.pivot,
            data[v.pivot],
            want
        );
    }
}

/// Assert `got` is a permutation of `want` (order-agnostic).
pub fn assert_permutation<T: Ord + Copy + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort_unstable();
    let mut b = want.to_vec();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}

pub fn centroid_of(mesh: &TriMesh, trinum: usize) -> Point2 {
    mesh.centroid(trinum)
}
