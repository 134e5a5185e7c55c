use trimesh_amr::mesh_generation::{GridKind, trigrid};

#[test]
fn counts_per_kind() {
    for (kind, npoints, ntriangs) in [
        (GridKind::EastSlope, 20, 24),
        (GridKind::WestSlope, 20, 24),
        (GridKind::EastSnake, 20, 24),
        (GridKind::WestSnake, 20, 24),
        (GridKind::CrossWise, 32, 48),
    ] {
        let mesh = trigrid(5, 4, kind);
        assert_eq!(mesh.npoints(), npoints, "{kind}");
        assert_eq!(mesh.ntriangs(), ntriangs, "{kind}");
        assert!(!mesh.hasghosts(), "{kind}");
        assert!(!mesh.hasvoids(), "{kind}");
        assert_eq!(mesh.meshedge().getloops().unwrap().len(), 1, "{kind}");
    }
}

#[test]
fn cross_wise_centres_follow_the_lattice() {
    let mesh = trigrid(3, 2, GridKind::CrossWise);
    assert_eq!(mesh.npoints(), 8);
    assert_eq!(mesh.point(6).to_array(), [0.5, 0.5]);
    assert_eq!(mesh.point(7).to_array(), [1.5, 0.5]);
    assert_eq!(mesh.triangs()[0], [6, 1, 0]);
    assert_eq!(mesh.nodesmap().rank_of(6), 4);
}

#[test]
fn west_slope_cuts_the_other_diagonal() {
    let mesh = trigrid(2, 2, GridKind::WestSlope);
    assert_eq!(mesh.triangs(), &[[2, 3, 1], [1, 0, 2]]);
}

#[test]
fn names_round_trip() {
    for kind in GridKind::ALL {
        assert_eq!(kind.to_string().parse::<GridKind>().unwrap(), kind);
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, format!("\"{kind}\""));
    }
}
