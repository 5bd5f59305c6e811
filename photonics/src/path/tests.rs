use approx::{assert_abs_diff_eq, assert_relative_eq};
use geometry::prelude::*;
use test_log::test;

use super::smooth::{self, smooth};
use super::*;
use crate::cross_section::Param;
use crate::error::{Error, SpecificationError};

fn turn_between(a: Point, b: Point, c: Point) -> f64 {
    shortest_turn(heading(b, c) - heading(a, b))
}

#[test]
fn path_rejects_degenerate_points() {
    assert!(matches!(
        Path::from_points([(0., 0.)]),
        Err(Error::Specification(SpecificationError::TooFewPoints { found: 1, .. }))
    ));
    assert!(matches!(
        Path::from_points([(0., 0.), (1., 0.), (1., 0.)]),
        Err(Error::Specification(SpecificationError::CoincidentPoints { index: 2 }))
    ));
    assert!(matches!(
        Path::from_points([(0., 0.), (f64::NAN, 0.)]),
        Err(Error::Specification(SpecificationError::NonFinitePoint { index: 1 }))
    ));
}

#[test]
fn straight_is_evenly_sampled() {
    let path = straight(10., 11).unwrap();
    assert_eq!(path.num_points(), 11);
    assert_eq!(path.start(), Point::zero());
    assert_eq!(path.end(), Point::new(10., 0.));
    assert_relative_eq!(path.points()[3].x, 3., epsilon = 1e-12);
    assert_eq!(path.start_angle(), 0.);
    assert_eq!(path.end_angle(), 0.);
    assert_relative_eq!(path.length(), 10.);
}

#[test]
fn straight_rejects_bad_input() {
    assert!(straight(0., 10).is_err());
    assert!(straight(-1., 10).is_err());
    assert!(straight(1., 1).is_err());
}

#[test]
fn arc_points_lie_on_circle() {
    let path = arc(5., 90., 720).unwrap();
    assert_eq!(path.num_points(), 180);
    let center = Point::new(0., 5.);
    for p in path.points() {
        assert_relative_eq!(p.distance(center), 5., epsilon = 1e-12);
    }
    assert_relative_eq!(path.length(), 5. * std::f64::consts::FRAC_PI_2, epsilon = 1e-3);
    assert_eq!(path.radii(), Some(BendRadii { effective: 5., min: 5. }));
}

#[test]
fn negative_arc_turns_clockwise() {
    let path = arc(5., -90., 720).unwrap();
    assert_abs_diff_eq!(path.end().x, 5., epsilon = 1e-12);
    assert_abs_diff_eq!(path.end().y, -5., epsilon = 1e-12);
    assert_eq!(path.end_angle(), -90.);
    assert!(path.points().iter().all(|p| p.y <= 0.));
}

#[test]
fn euler_is_symmetric_and_scaled() {
    let path = euler(10., 90., 1., false, 720).unwrap();
    let radii = path.radii().unwrap();
    assert_relative_eq!(radii.min, 10., epsilon = 1e-12);
    assert!(radii.effective > radii.min);
    let end = path.end();
    assert_abs_diff_eq!(end.x, end.y, epsilon = 1e-6);
    assert_abs_diff_eq!(end.y, radii.effective, epsilon = 1e-6);
}

#[test]
fn partial_euler_has_smaller_effective_radius() {
    let full = euler(10., 90., 1., false, 720).unwrap().radii().unwrap();
    let partial = euler(10., 90., 0.2, false, 720).unwrap().radii().unwrap();
    assert!(partial.effective < full.effective);
    assert!(partial.effective > 10.);
}

#[test]
fn negative_euler_mirrors() {
    let left = euler(10., 45., 0.5, true, 720).unwrap();
    let right = euler(10., -45., 0.5, true, 720).unwrap();
    assert_eq!(left.num_points(), right.num_points());
    for (a, b) in left.points().iter().zip(right.points()) {
        assert_eq!(a.x, b.x);
        assert_eq!(a.y, -b.y);
    }
    assert_eq!(right.end_angle(), -45.);
}

#[test]
fn euler_rejects_bad_fraction() {
    assert!(euler(10., 90., 0., false, 720).is_err());
    assert!(euler(10., 90., 1.5, false, 720).is_err());
}

#[test]
fn append_continues_tangent() {
    let mut path = straight(10., 2).unwrap();
    path.append(&arc(5., 90., 720).unwrap())
        .append(&straight(3., 4).unwrap());
    assert_relative_eq!(path.end_angle(), 90.);
    assert_relative_eq!(path.end(), Point::new(15., 8.), epsilon = 1e-9);
    assert!(polyline::first_coincident(path.points(), 0.).is_none());
    assert!(path.radii().is_none());
}

#[test]
fn rotate_and_mirror_update_angles() {
    let path = straight(2., 2).unwrap().rotate(90.);
    assert_eq!(path.end(), Point::new(0., 2.));
    assert_eq!(path.start_angle(), 90.);

    let path = arc(1., 90., 360).unwrap().mirror_x();
    assert_eq!(path.end_angle(), -90.);
    assert_abs_diff_eq!(path.end().y, -1., epsilon = 1e-12);

    let path = straight(1., 2).unwrap().translate(Point::new(1., 1.));
    assert_eq!(path.start(), Point::new(1., 1.));
}

#[test]
fn constant_offset_keeps_angles() {
    let path = arc(10., 90., 720).unwrap();
    let shifted = path.offset(&Param::Constant(1.)).unwrap();
    assert_eq!(shifted.start_angle(), 0.);
    assert_eq!(shifted.end_angle(), 90.);
    assert_abs_diff_eq!(shifted.start().y, 1., epsilon = 1e-12);
    // Offsetting toward the center shrinks the radius.
    let center = Point::new(0., 10.);
    assert_relative_eq!(shifted.points()[50].distance(center), 9., epsilon = 1e-6);
}

#[test]
fn sampled_offset_recomputes_angles() {
    let path = straight(10., 11).unwrap();
    let shifted = path.offset(&Param::linear(0., 1.)).unwrap();
    assert_abs_diff_eq!(shifted.end().y, 1., epsilon = 1e-12);
    assert_relative_eq!(shifted.start_angle(), 0.1f64.atan().to_degrees(), epsilon = 1e-9);
}

#[test]
fn smooth_arc_corner() {
    let path = smooth([(0., 0.), (10., 0.), (10., 10.)], 2., &smooth::Arc::default()).unwrap();
    assert_eq!(path.start(), Point::zero());
    assert_eq!(path.end(), Point::new(10., 10.));
    assert_eq!(path.start_angle(), 0.);
    assert_eq!(path.end_angle(), 90.);

    // The corner starts 2 before the waypoint and ends 2 after it.
    let points = path.points();
    assert_abs_diff_eq!(points[1].x, 8., epsilon = 1e-9);
    assert_abs_diff_eq!(points[points.len() - 2].y, 2., epsilon = 1e-9);

    // The heading turns monotonically through the corner.
    let mut total = 0.;
    for w in points.windows(3) {
        let t = turn_between(w[0], w[1], w[2]);
        assert!(t >= -1e-9);
        total += t;
    }
    assert_relative_eq!(total, 90., epsilon = 1e-9);
}

#[test]
fn smooth_feasibility_boundary() {
    let arc = smooth::Arc::default();
    let ok = smooth([(0., 0.), (10., 0.), (10., 2.), (20., 2.)], 1., &arc);
    assert!(ok.is_ok());
    let path = ok.unwrap();
    assert!(polyline::first_coincident(path.points(), 0.).is_none());

    let err = smooth([(0., 0.), (10., 0.), (10., 1.), (20., 1.)], 1., &arc).unwrap_err();
    match err {
        Error::Specification(SpecificationError::InsufficientSpacing {
            segment,
            required,
            available,
        }) => {
            assert_eq!(segment, 1);
            assert_relative_eq!(required, 2., epsilon = 1e-9);
            assert_eq!(available, 1.);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn smooth_checks_first_and_last_segments() {
    let err = smooth([(0., 0.), (1., 0.), (1., 10.)], 2., &smooth::Arc::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Specification(SpecificationError::InsufficientSpacing { segment: 0, .. })
    ));
}

#[test]
fn smooth_rejects_invalid_waypoints() {
    let arc = smooth::Arc::default();
    assert!(matches!(
        smooth([(0., 0.), (1., 0.)], 1., &arc),
        Err(Error::Specification(SpecificationError::TooFewPoints { required: 3, found: 2 }))
    ));
    assert!(matches!(
        smooth([(0., 0.), (5., 0.), (5., 0.), (5., 5.)], 1., &arc),
        Err(Error::Specification(SpecificationError::CoincidentPoints { index: 2 }))
    ));
    assert!(matches!(
        smooth([(0., 0.), (5., 0.), (0., 0.)], 1., &arc),
        Err(Error::Specification(SpecificationError::UnroundableTurn { waypoint: 1, .. }))
    ));
    assert!(smooth([(0., 0.), (5., 0.), (5., 5.)], 0., &arc).is_err());
}

#[test]
fn smooth_skips_collinear_waypoints() {
    let path = smooth([(0., 0.), (5., 0.), (10., 0.), (10., 10.)], 1., &smooth::Arc::default())
        .unwrap();
    assert!(!path.points().contains(&Point::new(5., 0.)));
    assert_eq!(path.end(), Point::new(10., 10.));
}

#[test]
fn smooth_with_euler_uses_effective_radius() {
    let corner = smooth::Euler::default();
    let bend = euler(2., 90., 1., false, 720).unwrap();
    let reff = bend.radii().unwrap().effective;
    let path = smooth([(0., 0.), (10., 0.), (10., 10.)], 2., &corner).unwrap();
    assert_abs_diff_eq!(path.points()[1].x, 10. - reff, epsilon = 1e-6);
}

#[test]
fn smooth_accepts_closures() {
    let corner = |radius: f64, angle: f64| arc(radius, angle, 90);
    let path = smooth([(0., 0.), (10., 0.), (10., -10.)], 3., &corner).unwrap();
    assert_eq!(path.end_angle(), -90.);
    assert!(path.num_points() > 3);
}
