mod util;

use proptest::prelude::*;
use trimesh_amr::adapt::AmrUnit;
use trimesh_amr::config::VOID_TOL;
use trimesh_amr::mesh_error::AmrError;
use trimesh_amr::mesh_generation::{GridKind, trigrid};
use trimesh_amr::topology::skeleton::MeshSkeleton;
use util::*;

fn kind_strategy() -> impl Strategy<Value = GridKind> {
    prop::sample::select(GridKind::ALL.to_vec())
}

fn unit_on(kind: GridKind) -> AmrUnit {
    AmrUnit::new(trigrid(5, 5, kind))
        .makedata("u", bumpy, true)
        .expect("field on a conforming grid")
}

/// Checks every refined mesh must pass.
fn check_refined(unit: &AmrUnit) -> Result<(), TestCaseError> {
    let mesh = unit.mesh();
    prop_assert!(!mesh.hasghosts());
    let skeleton = MeshSkeleton::from_mesh(mesh, VOID_TOL);
    prop_assert!(skeleton.is_ok(), "skeleton: {:?}", skeleton.err());
    let u = unit.field("u").expect("field u");
    prop_assert_eq!(u.len(), mesh.npoints());
    assert_void_constraints(mesh, u);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_refine_keeps_constraints_and_totals(
        kind in kind_strategy(),
        first in prop::collection::vec(0usize..40, 0..12),
        second in prop::collection::vec(0usize..120, 0..16),
    ) {
        let coarse = unit_on(kind);
        let before = total(coarse.mesh(), coarse.field("u").unwrap());

        let once = coarse.refine(&first).unwrap();
        check_refined(&once)?;
        let after = total(once.mesh(), once.field("u").unwrap());
        prop_assert!((before - after).abs() < 1e-9, "{} vs {}", before, after);

        let twice = once.refine(&second).unwrap();
        check_refined(&twice)?;
        let again = total(twice.mesh(), twice.field("u").unwrap());
        prop_assert!((before - again).abs() < 1e-9, "{} vs {}", before, again);
        prop_assert!(twice.mesh().ntriangs() >= once.mesh().ntriangs());
    }

    #[test]
    fn prop_coarsen_is_total_or_refused(
        kind in kind_strategy(),
        picks in prop::collection::vec(0usize..40, 1..12),
    ) {
        let fine = unit_on(kind).refine(&picks).unwrap();
        let cores = match fine.front_fine() {
            Ok(front) => front.suptriu().map(|s| s.trinums()).unwrap_or_default(),
            Err(e) => return Err(TestCaseError::fail(format!("front: {e}"))),
        };
        match fine.coarsen(&cores) {
            Ok(back) => {
                prop_assert!(back.mesh().ntriangs() <= fine.mesh().ntriangs());
                prop_assert_eq!(back.field("u").unwrap().len(), back.mesh().npoints());
            }
            Err(AmrError::NonMeshableCluster { .. }) => {}
            Err(e) => return Err(TestCaseError::fail(format!("coarsen: {e}"))),
        }
    }
}
