use crate::geom::{OffsetError, Plane, PlanarRegion, Point3, Tolerance, Vec3, offset_loop_inward};

#[test]
fn offset_of_vertical_wall_stays_in_wall_plane() {
    let wall = vec![
        Point3::new(0.0, 2.0, 0.0),
        Point3::new(8.0, 2.0, 0.0),
        Point3::new(8.0, 2.0, 3.0),
        Point3::new(0.0, 2.0, 3.0),
    ];
    let plane = Plane::fit_loop(&wall, Tolerance::DEFAULT).expect("plane");
    let (inset, _) = offset_loop_inward(&wall, &plane, 0.5, Tolerance::DEFAULT).expect("offset");

    assert_eq!(inset.len(), 4);
    for point in &inset {
        assert!((point.y - 2.0).abs() < 1e-12);
        assert!(point.x > 0.49 && point.x < 7.51);
        assert!(point.z > 0.49 && point.z < 2.51);
    }

    let region = PlanarRegion::with_plane(plane, inset, Vec::new(), 1e-3).expect("region");
    assert!((region.area() - 7.0 * 2.0).abs() < 1e-9);
}

#[test]
fn l_shaped_loop_keeps_reflex_corner_sharp() {
    let l_shape = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(6.0, 0.0, 0.0),
        Point3::new(6.0, 2.0, 0.0),
        Point3::new(2.0, 2.0, 0.0),
        Point3::new(2.0, 6.0, 0.0),
        Point3::new(0.0, 6.0, 0.0),
    ];
    let (inset, diag) =
        offset_loop_inward(&l_shape, &Plane::WORLD_XY, 0.5, Tolerance::DEFAULT).expect("offset");
    assert_eq!(diag.mitred_corners, 6);
    let tol = Tolerance::new(1e-9);
    assert!(tol.approx_eq_point3(inset[3], Point3::new(1.5, 1.5, 0.0)));
    assert!(tol.approx_eq_point3(inset[0], Point3::new(0.5, 0.5, 0.0)));
}

#[test]
fn rejects_non_positive_distance() {
    let square = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    let err = offset_loop_inward(&square, &Plane::WORLD_XY, 0.0, Tolerance::DEFAULT).unwrap_err();
    assert_eq!(err, OffsetError::InvalidDistance { distance: 0.0 });
}

#[test]
fn tilted_plane_offset_matches_flat_result() {
    let plane = Plane::new(
        Point3::new(1.0, 1.0, 1.0),
        Vec3::new(1.0, 0.0, 1.0),
        Vec3::new(0.0, 1.0, 0.0),
    )
    .expect("plane");
    let square: Vec<Point3> = [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]]
        .iter()
        .map(|c| plane.point_at(c[0], c[1]))
        .collect();
    let (inset, _) = offset_loop_inward(&square, &plane, 1.0, Tolerance::DEFAULT).expect("offset");
    let local = plane.local_2d(inset[0]);
    assert!((local[0] - 1.0).abs() < 1e-9);
    assert!((local[1] - 1.0).abs() < 1e-9);
}
