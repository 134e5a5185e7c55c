mod util;

use trimesh_amr::adapt::TriFront;
use trimesh_amr::config::VOID_TOL;
use trimesh_amr::data::constr_data;
use trimesh_amr::geometry::Point2;
use trimesh_amr::mesh_generation::{GridKind, trigrid};
use trimesh_amr::topology::TriMesh;
use trimesh_amr::topology::refine::refine_mesh;
use trimesh_amr::topology::skeleton::MeshSkeleton;
use util::*;

#[test]
fn interior_triangle_hangs_three_voids() {
    let mesh = grid4();
    let refined = refine_mesh(&mesh, &[INTERIOR]).expect("refinement should succeed");
    let fine = &refined.mesh;
    assert_eq!(fine.npoints(), 19);
    assert_eq!(fine.ntriangs(), 24);
    assert_eq!(fine.getvoids().len(), 3);
    assert!(!fine.hasghosts());

    let skeleton = MeshSkeleton::from_mesh(fine, VOID_TOL).expect("pivots keep rank 4");
    assert_eq!(skeleton.size(), 3);
    let cores = skeleton.cores();
    assert!(cores.iter().all(|&c| c == cores[0]));
    assert_permutation(&skeleton.pivots(), &[16, 17, 18]);
}

#[test]
fn boundary_sides_get_no_void() {
    let refined = refine_mesh(&grid4(), &[0]).expect("refinement should succeed");
    assert_eq!(refined.mesh.npoints(), 19);
    assert_eq!(refined.mesh.ntriangs(), 23);
    assert_eq!(refined.mesh.getvoids().len(), 2);
}

#[test]
fn full_refinement_is_conforming() {
    let mesh = trigrid(3, 3, GridKind::EastSlope);
    let all: Vec<usize> = (0..mesh.ntriangs()).collect();
    let refined = refine_mesh(&mesh, &all).expect("refinement should succeed");
    assert_eq!(refined.mesh.ntriangs(), 32);
    assert_eq!(refined.mesh.npoints(), 25);
    assert!(!refined.mesh.hasvoids());
    assert_eq!(refined.refiner.master_nodes().len(), 9);
    assert_eq!(refined.refiner.slave_nodes().len(), 16);
    let area: f64 = refined.mesh.areas().iter().sum();
    assert!((area - 4.0).abs() < 1e-12);
}

#[test]
fn triangles_around_pivots_are_not_refined() {
    let fine = refine_mesh(&grid4(), &[INTERIOR]).unwrap().mesh;
    let skeleton = MeshSkeleton::from_mesh(&fine, VOID_TOL).unwrap();
    let mut children = skeleton.cores();
    children.extend(skeleton.wests());
    children.extend(skeleton.easts());
    let again = refine_mesh(&fine, &children).unwrap();
    assert_eq!(again.mesh, fine);
    assert!(again.refiner.slave_nodes().is_empty());
}

#[test]
fn refining_across_a_void_merges_the_twin() {
    let first = refine_mesh(&grid4(), &[INTERIOR]).unwrap();
    let fine = &first.mesh;
    let below = TriFront::coarse(fine, VOID_TOL)
        .filter_by_mask(|p| p.y < 1.0)
        .trinums();
    assert_eq!(below, vec![7]);
    let second = refine_mesh(fine, &below).unwrap();
    let twice = &second.mesh;
    assert_eq!(twice.npoints(), 21);
    assert_eq!(twice.ntriangs(), 28);
    assert_eq!(twice.getvoids().len(), 4);
    assert!(MeshSkeleton::from_mesh(twice, VOID_TOL).is_ok());

    // the merged pivot keeps its value through both refiners
    let on_fine = first.refiner.refine(&sample(&grid4(), linear)).unwrap();
    let on_twice = second.refiner.refine(&on_fine).unwrap();
    assert_eq!(on_twice.len(), twice.npoints());
    for (p, v) in twice.points().iter().zip(&on_twice) {
        assert!((v - linear(p.x, p.y)).abs() < 1e-12, "{:?} holds {}", p, v);
    }
    assert_void_constraints(twice, &on_twice);
}

#[test]
fn refined_data_is_interpolated() {
    let mesh = grid4();
    let refined = refine_mesh(&mesh, &[INTERIOR, 0]).unwrap();
    let coarse = sample(&mesh, bumpy);
    let fine = refined.refiner.refine(&coarse).unwrap();
    assert_eq!(fine.len(), refined.mesh.npoints());
    assert_void_constraints(&refined.mesh, &fine);
    assert!((total(&mesh, &coarse) - total(&refined.mesh, &fine)).abs() < 1e-10);
    assert!(refined.refiner.refine(&coarse[1..]).is_err());
}

#[test]
fn void_constraint_on_a_seven_node_mesh() {
    let points = vec![
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(1.0, 1.0),
        Point2::new(0.0, 1.0),
        Point2::new(0.5, 0.5),
        Point2::new(0.5, 0.0),
        Point2::new(1.0, 0.5),
    ];
    let triangs = vec![
        [2, 3, 0],
        [5, 6, 4],
        [5, 1, 6],
        [6, 2, 4],
        [4, 0, 5],
        [2, 0, 4],
    ];
    let mesh = TriMesh::from_data(points, triangs).unwrap();
    let voids = mesh.voids();
    assert_eq!(voids.len(), 1);
    assert_eq!((voids[0].west, voids[0].east, voids[0].pivot), (2, 0, 4));

    let data = vec![3.0, -1.0, 7.0, 0.5, 100.0, 2.0, 4.0];
    let constrained = constr_data(&mesh, &data).unwrap();
    assert_eq!(constrained[4], 0.5 * (constrained[2] + constrained[0]));
    assert_eq!(constrained[4], 5.0);
    assert_eq!(&constrained[..4], &data[..4]);
}
