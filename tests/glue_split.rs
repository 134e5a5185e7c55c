mod util;

use trimesh_amr::algs::glue::{join_meshes, join_meshes_with};
use trimesh_amr::config::AmrConfig;
use trimesh_amr::geometry::Point2;
use trimesh_amr::mesh_generation::{GridKind, trigrid};
use trimesh_amr::topology::TriMesh;
use trimesh_amr::topology::refine::refine_mesh;
use util::*;

fn area(mesh: &TriMesh) -> f64 {
    mesh.areas().iter().sum()
}

#[test]
fn joined_grids_share_one_column() {
    let left = trigrid(3, 3, GridKind::EastSlope);
    let right = &trigrid(3, 3, GridKind::WestSnake) + Point2::new(2.0, 0.0);
    let joined = join_meshes_with(&left, &right, &AmrConfig::default())
        .expect("grids touch along x = 2");
    assert_eq!(joined.npoints(), 15);
    assert_eq!(joined.ntriangs(), 16);
    assert!((area(&joined) - 8.0).abs() < 1e-12);
    assert!(!joined.hasghosts());
    let loops = joined.meshedge().getloops().unwrap();
    assert_eq!(loops.len(), 1);
    assert_eq!(loops[0].size(), 12);
    assert_eq!(joined.split().len(), 1);
}

#[test]
fn disjoint_parts_split_apart() {
    let left = trigrid(3, 3, GridKind::EastSlope);
    let far = &left + Point2::new(10.0, 0.0);
    assert!(join_meshes(&left, &far, 1e-9).is_none());

    let shift = left.npoints();
    let shifted: Vec<_> = far.triangs().iter().map(|t| t.map(|n| n + shift)).collect();
    let both = left.add_points(far.points()).add_triangs(&shifted);
    let parts = both.split();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].ntriangs(), 8);
    assert_eq!(parts[1].ntriangs(), 8);
    assert!(parts[0].triangs().iter().flatten().all(|&n| n < shift));
    assert!(parts[1].triangs().iter().flatten().all(|&n| n >= shift));
}

#[test]
fn split_separates_refinement_levels() {
    let fine = refine_mesh(&grid4(), &[INTERIOR]).unwrap().mesh;
    assert_eq!(fine.getvoids().len(), 3);
    // without voids the children only touch the coarse triangles at nodes
    let parts = fine.split();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].ntriangs(), 17);
    assert_eq!(parts[1].ntriangs(), 4);
    assert!(parts.iter().all(|p| !p.hasvoids()));
    let total: f64 = parts.iter().map(area).sum();
    assert!((total - area(&grid4())).abs() < 1e-12);
}
