mod util;

use trimesh_amr::topology::refine::refine_mesh;
use trimesh_amr::config::VOID_TOL;
use trimesh_amr::mesh_generation::{GridKind, trigrid};
use trimesh_amr::topology::{MeshSkeleton, SuperTriu, TriMesh, Triangle};
use util::*;

fn sorted_triples(triangs: &[Triangle]) -> Vec<Triangle> {
    let mut out: Vec<Triangle> = triangs
        .iter()
        .map(|t| {
            let mut s = *t;
            s.sort_unstable();
            s
        })
        .collect();
    out.sort_unstable();
    out
}

fn uniform(mesh: &TriMesh) -> TriMesh {
    let all: Vec<usize> = (0..mesh.ntriangs()).collect();
    refine_mesh(mesh, &all).unwrap().mesh
}

fn reduced(fine: &TriMesh) -> SuperTriu {
    fine.supertriu()
        .reduce(None)
        .expect("uniform refinement holds a compact cluster")
}

#[test]
fn uniform_refinement_reduces_to_its_parents() {
    let coarse = grid4();
    let fine = uniform(&coarse);
    assert_eq!(fine.ntriangs(), 72);
    let st = reduced(&fine);
    assert_eq!(st.size(), 18);
    assert!(st.is_compact());
    let mut cores = st.trinums();
    cores.sort_unstable();
    assert_eq!(cores, (0..18).collect::<Vec<_>>());
    assert_eq!(
        sorted_triples(st.supmesh().triangs()),
        sorted_triples(coarse.triangs())
    );
}

#[test]
fn raw_rows_overlap() {
    let fine = uniform(&grid4());
    let raw = fine.supertriu();
    assert!(raw.size() > 18);
    assert!(!raw.is_compact());
}

#[test]
fn detach_keeps_interior_parents() {
    let st = reduced(&uniform(&grid4()));
    let inner = st.detach();
    assert_eq!(inner.size(), 2);
    assert_eq!(
        sorted_triples(inner.supmesh().triangs()),
        vec![[5, 6, 10], [5, 9, 10]]
    );
}

#[test]
fn strip_and_smooth_shrink_the_cluster() {
    let st = reduced(&uniform(&grid4()));
    let stripped = st.strip();
    assert!(stripped.size() < st.size());
    assert!(stripped.is_compact());
    let smoothed = stripped.smooth(true);
    assert!(smoothed.size() <= stripped.size());
}

#[test]
fn compress_needs_enough_rows() {
    let st = reduced(&uniform(&grid4()));
    assert!(st.compress_with(None, 19).is_none());
    let all = st.compress_with(None, 18).expect("all rows are connected");
    assert_eq!(all.size(), 18);
    assert_eq!(all.rows()[0].core, st.rows()[0].core);
}

#[test]
fn seeds_pick_the_nearest_supertriangle() {
    let st = reduced(&uniform(&grid4()));
    let seed = st.find_seed(trimesh_amr::geometry::Point2::new(2.9, 2.1)).unwrap();
    let mut corner = st.rows()[seed].vertices;
    corner.sort_unstable();
    assert_eq!(corner, [10, 14, 15]);
    assert_eq!(st.atcores(&[st.rows()[seed].core]).size(), 1);
}

#[test]
fn reduced_uniform_refinement_is_the_parent_grid() {
    let coarse = trigrid(5, 5, GridKind::EastSlope);
    let fine = uniform(&coarse);
    assert_eq!(fine.npoints(), 81);
    let back = fine.reduced(0, false);
    assert_eq!(back.npoints(), 25);
    assert_eq!(back.points(), coarse.points());
    assert_eq!(
        sorted_triples(back.triangs()),
        sorted_triples(coarse.triangs())
    );
    assert!(!back.hasvoids());
}

#[test]
fn reduced_detached_cluster_hangs_on_voids() {
    let fine = uniform(&trigrid(5, 5, GridKind::EastSlope));
    let mixed = fine.reduced(0, true);
    // 8 parents, 8 voids on the hole, 128 - 32 fine triangles outside
    assert_eq!(mixed.ntriangs(), 8 + 8 + 96);
    assert_eq!(mixed.getvoids().len(), 8);
    assert_eq!(mixed.npoints(), 73);
    let skeleton = MeshSkeleton::from_mesh(&mixed, VOID_TOL).unwrap();
    assert_eq!(skeleton.size(), 8);
    for v in mixed.voids() {
        let mid = trimesh_amr::geometry::Point2::midpoint(mixed.point(v.west), mixed.point(v.east));
        assert_eq!(mixed.point(v.pivot), mid);
    }
}

#[test]
fn reduced_without_cores_is_unchanged() {
    let square = trigrid(2, 2, GridKind::EastSlope);
    let same = square.reduced(0, true);
    assert_eq!(same.points(), square.points());
    assert_eq!(same.triangs(), square.triangs());
}
