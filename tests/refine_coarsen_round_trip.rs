mod util;

use trimesh_amr::adapt::AmrUnit;
use trimesh_amr::config::VOID_TOL;
use trimesh_amr::topology::coarsen::coarsen_mesh;
use trimesh_amr::topology::refine::refine_mesh;
use trimesh_amr::topology::skeleton::MeshSkeleton;
use trimesh_amr::topology::{TriMesh, Triangle};
use util::*;

/// Triangles rotated to start at their smallest node, sorted.
fn canonical(mesh: &TriMesh) -> Vec<Triangle> {
    let mut out: Vec<Triangle> = mesh
        .triangs()
        .iter()
        .map(|t| {
            let k = (0..3).min_by_key(|&i| t[i]).unwrap_or(0);
            [t[k], t[(k + 1) % 3], t[(k + 2) % 3]]
        })
        .collect();
    out.sort_unstable();
    out
}

/// Cores of the clusters around the pivots of `mesh`.
fn fine_cores(mesh: &TriMesh) -> Vec<usize> {
    let mut cores = MeshSkeleton::from_mesh(mesh, VOID_TOL)
        .expect("valid skeleton")
        .cores();
    cores.sort_unstable();
    cores.dedup();
    cores
}

#[test]
fn interior_round_trip_restores_topology() {
    let mesh = grid4();
    let fine = refine_mesh(&mesh, &[INTERIOR]).unwrap().mesh;
    let back = coarsen_mesh(&fine, &fine_cores(&fine)).expect("coarsening should succeed");
    assert!(back.collector.is_some());
    assert_eq!(back.mesh.npoints(), mesh.npoints());
    assert_eq!(back.mesh.ntriangs(), mesh.ntriangs());
    assert_eq!(back.mesh.points(), mesh.points());
    assert_eq!(canonical(&back.mesh), canonical(&mesh));
    assert!(!back.mesh.hasvoids());
}

#[test]
fn boundary_round_trip_restores_topology() {
    let mesh = grid4();
    let fine = refine_mesh(&mesh, &[0]).unwrap().mesh;
    let back = coarsen_mesh(&fine, &fine_cores(&fine)).unwrap();
    assert_eq!(canonical(&back.mesh), canonical(&mesh));
}

#[test]
fn linear_fields_survive_the_round_trip() {
    let unit = AmrUnit::new(grid4())
        .makedata("u", linear, true)
        .unwrap()
        .refine(&[INTERIOR, 0])
        .unwrap();
    let cores = fine_cores(unit.mesh());
    let back = unit.coarsen(&cores).unwrap();
    assert_eq!(back.mesh().ntriangs(), 18);
    let u = back.field("u").unwrap();
    for (p, value) in back.mesh().points().iter().zip(u) {
        assert!((value - linear(p.x, p.y)).abs() < 1e-10, "at {p:?}");
    }
}

#[test]
fn total_mass_is_conserved() {
    let mesh = grid4();
    let coarse = sample(&mesh, bumpy);
    let refined = refine_mesh(&mesh, &[INTERIOR]).unwrap();
    let fine = refined.refiner.refine(&coarse).unwrap();
    let fine_total = total(&refined.mesh, &fine);
    assert!((fine_total - total(&mesh, &coarse)).abs() < 1e-10);

    // perturb the fine field so coarsening has to project
    let mut noisy = fine.clone();
    for (i, v) in noisy.iter_mut().enumerate() {
        *v += 0.01 * (i as f64).cos();
    }
    let noisy = trimesh_amr::data::constr_data(&refined.mesh, &noisy).unwrap();
    let noisy_total = total(&refined.mesh, &noisy);

    let back = coarsen_mesh(&refined.mesh, &fine_cores(&refined.mesh)).unwrap();
    let collector = back.collector.expect("cluster coarsened");
    let collected = collector.collect(&noisy).unwrap();
    assert_eq!(collected.len(), back.mesh.npoints());
    assert!((total(&back.mesh, &collected) - noisy_total).abs() < 1e-10);
}

#[test]
fn coarsening_next_to_a_finer_neighbour_keeps_a_void() {
    let fine = refine_mesh(&grid4(), &[INTERIOR]).unwrap().mesh;
    let twice = refine_mesh(&fine, &[7]).unwrap().mesh;
    assert_eq!(twice.getvoids().len(), 4);

    // the cluster of the first refinement is the one whose core sits above y = 1
    let cores: Vec<usize> = fine_cores(&twice)
        .into_iter()
        .filter(|&c| twice.centroid(c).y > 1.0)
        .collect();
    assert_eq!(cores.len(), 1);
    let back = coarsen_mesh(&twice, &cores).unwrap();
    assert_eq!(back.mesh.npoints(), 19);
    assert_eq!(back.mesh.ntriangs(), 24);
    assert_eq!(back.mesh.getvoids().len(), 3);
    assert!(MeshSkeleton::from_mesh(&back.mesh, VOID_TOL).is_ok());
}

#[test]
fn unknown_cores_leave_the_mesh_alone() {
    let fine = refine_mesh(&grid4(), &[INTERIOR]).unwrap().mesh;
    let same = coarsen_mesh(&fine, &[0, 1, 1000]).unwrap();
    assert!(same.collector.is_none());
    assert_eq!(same.mesh, fine);
}
