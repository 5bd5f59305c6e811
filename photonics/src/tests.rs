use approx::{assert_abs_diff_eq, assert_relative_eq};
use test_log::test;

use crate::components::{rectangle, waveguide, RectPort};
use crate::error::{Error, GeometryError, SpecificationError};
use crate::prelude::*;

fn strip_xs(width: impl Into<Param>) -> CrossSection {
    let mut xs = CrossSection::new();
    xs.add(width, 0., layers::WG, Some("in"), Some("out"));
    xs
}

fn bend() -> Path {
    arc(10., 90., 720).unwrap()
}

#[test]
fn straight_extrusion_has_ports_at_both_ends() {
    let path = straight(10., 100).unwrap();
    let c = extrude(&path, &strip_xs(0.5), &ExtrudeOpts::default()).unwrap();

    assert!(c.name().starts_with("path_"));
    assert_eq!(c.num_ports(), 2);

    let w0 = c.port("W0");
    assert_eq!(w0.midpoint(), Point::new(0., 0.));
    assert_eq!(w0.orientation(), 180.);
    assert_eq!(w0.width(), 0.5);
    assert_eq!(w0.layer(), layers::WG);
    assert_eq!(w0.parent(), Some(c.name()));

    let e0 = c.port("E0");
    assert_eq!(e0.midpoint(), Point::new(10., 0.));
    assert_eq!(e0.orientation(), 0.);
    assert_eq!(e0.width(), 0.5);

    let polygons: Vec<_> = c.polygons_on(layers::WG).collect();
    assert_eq!(polygons.len(), 1);
    assert_relative_eq!(polygons[0].area(), 5., epsilon = 1e-9);
}

#[test]
fn tapered_width_sets_port_widths() {
    let path = straight(10., 100).unwrap();
    let c = extrude(&path, &strip_xs(Param::linear(1., 2.)), &ExtrudeOpts::default()).unwrap();
    assert_relative_eq!(c.port("W0").width(), 1., epsilon = 1e-12);
    assert_relative_eq!(c.port("E0").width(), 2., epsilon = 1e-12);
    assert_relative_eq!(c.polygons_on(layers::WG).next().unwrap().area(), 15., epsilon = 1e-9);
}

#[test]
fn positive_offset_is_left_of_travel() {
    let path = straight(10., 10).unwrap();
    let mut xs = CrossSection::new();
    xs.add(0.5, 2., layers::SLAB90, None, None);
    let c = extrude(&path, &xs, &ExtrudeOpts::default()).unwrap();
    let (lo, hi) = c.polygons_on(layers::SLAB90).next().unwrap().bbox().unwrap();
    assert_abs_diff_eq!(lo.y, 1.75, epsilon = 1e-12);
    assert_abs_diff_eq!(hi.y, 2.25, epsilon = 1e-12);
    assert_eq!(c.num_ports(), 0);
}

#[test]
fn extrusion_is_deterministic() {
    let path = bend();
    let xs = strip_xs(0.5);
    let opts = ExtrudeOpts::default().with_snap_to_grid_nm(1);
    let a = extrude(&path, &xs, &opts).unwrap();
    let b = extrude(&path, &xs, &opts).unwrap();
    assert_eq!(a, b);
}

#[test]
fn different_geometry_gets_different_names() {
    let path = straight(10., 100).unwrap();
    let opts = ExtrudeOpts::default();
    let narrow = extrude(&path, &strip_xs(0.5), &opts).unwrap();
    let wide = extrude(&path, &strip_xs(0.6), &opts).unwrap();
    let tapered = extrude(&path, &strip_xs(Param::linear(0.5, 0.6)), &opts).unwrap();
    assert_ne!(narrow.name(), wide.name());
    assert_ne!(narrow.name(), tapered.name());
    assert_ne!(wide.name(), tapered.name());
}

#[test]
fn simplification_never_adds_vertices() {
    let path = bend();
    let xs = strip_xs(0.5);
    let count = |opts: ExtrudeOpts| {
        extrude(&path, &xs, &opts)
            .unwrap()
            .polygons_on(layers::WG)
            .next()
            .unwrap()
            .len()
    };
    let full = count(ExtrudeOpts::default());
    let fine = count(ExtrudeOpts::default().with_simplify(1e-4));
    let coarse = count(ExtrudeOpts::default().with_simplify(1e-2));
    assert_eq!(full, 2 * path.num_points());
    assert!(fine <= full);
    assert!(coarse <= fine);
    assert!(coarse < full);
}

#[test]
fn zero_tolerance_keeps_every_point() {
    let path = bend();
    let xs = strip_xs(0.5);
    let plain = extrude(&path, &xs, &ExtrudeOpts::default()).unwrap();
    let zero = extrude(&path, &xs, &ExtrudeOpts::default().with_simplify(0.)).unwrap();
    assert!(plain.shapes().eq(zero.shapes()));
}

#[test]
fn snapped_output_lies_on_grid() {
    let path = bend();
    let xs = strip_xs(0.5);
    let c = extrude(&path, &xs, &ExtrudeOpts::default().with_snap_to_grid_nm(5)).unwrap();
    for shape in c.shapes() {
        let polygon = shape.polygon();
        assert_eq!(&polygon.snap_to_grid_nm(5), polygon);
    }
}

#[test]
fn one_port_per_label() {
    let path = bend();
    let mut xs = CrossSection::new();
    xs.add(0.5, 0., layers::WG, Some("in"), Some("out"))
        .add(3., 0., layers::WGCLAD, None, None)
        .add(1., 2., layers::HEATER, Some("h"), None);
    let c = extrude(&path, &xs, &ExtrudeOpts::default().with_rename_ports(false)).unwrap();
    assert_eq!(c.num_ports(), xs.num_ports());
    assert_eq!(c.shapes().count(), 3);
    let names: Vec<_> = c.port_map().keys().map(|k| k.to_string()).collect();
    assert_eq!(names, ["0_in", "0_out", "2_h"]);
}

#[test]
fn renamed_bend_ports() {
    let c = extrude(&bend(), &strip_xs(0.5), &ExtrudeOpts::default()).unwrap();
    let names: Vec<_> = c.port_map().keys().map(|k| k.to_string()).collect();
    assert_eq!(names, ["W0", "N0"]);
    assert_abs_diff_eq!(c.port("N0").midpoint(), Point::new(10., 10.), epsilon = 1e-12);
    assert_abs_diff_eq!(c.port("N0").orientation(), 90., epsilon = 1e-9);
}

#[test]
fn sampled_offset_bends_the_strip() {
    let path = straight(10., 11).unwrap();
    let mut xs = CrossSection::new();
    xs.push(
        Strip::new(0.5, layers::WG)
            .with_offset(Param::linear(0., 1.))
            .with_ports(Some("in"), Some("out")),
    );
    let c = extrude(&path, &xs, &ExtrudeOpts::default()).unwrap();
    assert_abs_diff_eq!(c.port("W0").midpoint(), Point::new(0., 0.), epsilon = 1e-12);
    assert_abs_diff_eq!(c.port("E0").midpoint(), Point::new(10., 1.), epsilon = 1e-12);
    assert_relative_eq!(c.port("E0").orientation(), 0.1f64.atan().to_degrees(), epsilon = 1e-9);
    assert_relative_eq!(c.port("E0").width(), 0.5, epsilon = 1e-12);
}

#[test]
fn invalid_options_are_rejected() {
    let path = straight(10., 10).unwrap();
    let xs = strip_xs(0.5);
    for tol in [f64::NAN, -1., f64::INFINITY] {
        let err = extrude(&path, &xs, &ExtrudeOpts::default().with_simplify(tol)).unwrap_err();
        assert!(matches!(
            err,
            Error::Specification(SpecificationError::InvalidTolerance(_))
        ));
    }
    let err = extrude(&path, &xs, &ExtrudeOpts::default().with_snap_to_grid_nm(0)).unwrap_err();
    assert!(matches!(
        err,
        Error::Specification(SpecificationError::InvalidGrid(0))
    ));
}

#[test]
fn non_positive_widths_are_rejected() {
    let path = straight(10., 10).unwrap();
    for width in [0., -0.5] {
        let mut xs = strip_xs(0.5);
        xs.add(width, 0., layers::SLAB90, None, None);
        let err = extrude(&path, &xs, &ExtrudeOpts::default()).unwrap_err();
        assert!(err.is_specification());
        assert!(matches!(
            err,
            Error::Specification(SpecificationError::NonPositiveWidth { strip: 1, value })
                if value == width
        ));
        assert!(err.to_string().contains("strip 1"));
    }

    // The taper crosses zero before the end of the path.
    let err = extrude(&path, &strip_xs(Param::linear(0.5, -0.5)), &ExtrudeOpts::default())
        .unwrap_err();
    match err {
        Error::Specification(SpecificationError::NonPositiveWidth { strip, value }) => {
            assert_eq!(strip, 0);
            assert_relative_eq!(value, -0.5, epsilon = 1e-12);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn repeated_port_label_on_one_strip_is_rejected() {
    let path = straight(10., 10).unwrap();
    let mut xs = CrossSection::new();
    xs.add(0.5, 0., layers::WG, Some("o"), Some("o"));
    let err = extrude(&path, &xs, &ExtrudeOpts::default().with_rename_ports(false)).unwrap_err();
    match &err {
        Error::Specification(SpecificationError::DuplicatePortLabel { strip, label }) => {
            assert_eq!(*strip, 0);
            assert_eq!(label, "o");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // The same label on different strips stays distinct.
    let mut xs = CrossSection::new();
    xs.add(0.5, 0., layers::WG, Some("o"), None)
        .add(0.5, 2., layers::WG, Some("o"), None);
    let c = extrude(&path, &xs, &ExtrudeOpts::default().with_rename_ports(false)).unwrap();
    assert_eq!(c.num_ports(), 2);
}

#[test]
fn degenerate_strips_are_rejected() {
    let path = straight(10., 10).unwrap();
    let mut xs = strip_xs(0.5);
    xs.add(1e-4, 0., layers::SLAB90, None, None);
    let opts = ExtrudeOpts::default().with_snap_to_grid_nm(1);
    let err = extrude(&path, &xs, &opts).unwrap_err();
    assert!(err.is_geometry());
    assert!(matches!(err, Error::Geometry(GeometryError::ZeroArea { strip: 1 })));

    let err = extrude(&path, &strip_xs(f64::NAN), &ExtrudeOpts::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Specification(SpecificationError::UndefinedStripParam {
            strip: 0,
            param: "width"
        })
    ));

    let undefined = Param::sampled(|t| if t > 0.5 { f64::NAN } else { 0. });
    let mut xs = strip_xs(0.5);
    xs.push(Strip::new(1., layers::SLAB90).with_offset(undefined));
    let err = extrude(&path, &xs, &ExtrudeOpts::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Specification(SpecificationError::UndefinedStripParam {
            strip: 1,
            param: "offset"
        })
    ));
}

#[test]
fn options_from_config() {
    let config = config::Config::from_toml_str(
        r#"
        [extrude]
        simplify = 0.001
        snap_to_grid_nm = 1
        rename_ports = false
        "#,
    )
    .unwrap();
    let opts = ExtrudeOpts::from_config(&config);
    assert_eq!(
        opts,
        ExtrudeOpts {
            simplify: Some(0.001),
            snap_to_grid_nm: Some(1),
            rename_ports: false,
        }
    );
    assert_eq!(ExtrudeOpts::from_config(&config::Config::default()), ExtrudeOpts::default());
    assert_eq!(layers::from_config(&config, "WG"), Some(layers::WG));
    assert_eq!(layers::from_config(&config, "NOPE"), None);
}

#[test]
fn rectangle_ports_are_named() {
    let c = rectangle(
        (4., 2.),
        layers::WG,
        false,
        &[
            RectPort::new(Compass::W, 1., 0.5),
            RectPort::new(Compass::E, 1.5, 0.5),
            RectPort::new(Compass::E, 0.5, 0.5),
            RectPort::new(Compass::N, 2., 1.).with_port_type(PortType::Heater),
        ],
    )
    .unwrap();
    assert!(c.name().starts_with("rectangle_"));
    assert_eq!(c.port("W0").midpoint(), Point::new(0., 1.));
    assert_eq!(c.port("E0").midpoint(), Point::new(4., 0.5));
    assert_eq!(c.port("E1").midpoint(), Point::new(4., 1.5));
    assert_eq!(c.port("H_0").midpoint(), Point::new(2., 2.));
    assert_eq!(c.port("H_0").orientation(), 90.);
    assert_relative_eq!(c.shapes().next().unwrap().polygon().area(), 8.);
}

#[test]
fn centered_rectangle() {
    let c = rectangle((4., 2.), layers::M1, true, &[RectPort::new(Compass::S, 2., 1.)]).unwrap();
    let (lo, hi) = c.polygons_on(layers::M1).next().unwrap().bbox().unwrap();
    assert_eq!(lo, Point::new(-2., -1.));
    assert_eq!(hi, Point::new(2., 1.));
    assert_eq!(c.port("S0").midpoint(), Point::new(0., -1.));

    let other = rectangle((4., 2.), layers::M1, false, &[RectPort::new(Compass::S, 2., 1.)]).unwrap();
    assert_ne!(c.name(), other.name());
}

#[test]
fn rectangle_rejects_bad_input() {
    assert!(rectangle((0., 1.), layers::WG, false, &[]).is_err());
    assert!(rectangle((1., f64::NAN), layers::WG, false, &[]).is_err());
    assert!(rectangle((1., 1.), layers::WG, false, &[RectPort::new(Compass::E, 0.5, 0.)]).is_err());
    let err = rectangle(
        (1., 1.),
        layers::WG,
        false,
        &[RectPort::new(Compass::E, 0.5, 0.1).with_port_type(PortType::Rf)],
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::Specification(SpecificationError::UnsupportedPortType { .. })
    ));
}

#[test]
fn waveguide_with_cladding() {
    let c = waveguide(10., 0.5, layers::WG, &[layers::WGCLAD], 3.).unwrap();
    assert!(c.name().starts_with("waveguide_"));
    assert_eq!(c.shapes().count(), 2);
    let (lo, hi) = c.polygons_on(layers::WGCLAD).next().unwrap().bbox().unwrap();
    assert_eq!(lo, Point::new(0., -3.25));
    assert_eq!(hi, Point::new(10., 3.25));

    assert_eq!(c.port("W0").midpoint(), Point::new(0., 0.));
    assert_eq!(c.port("W0").orientation(), 180.);
    assert_eq!(c.port("E0").midpoint(), Point::new(10., 0.));
    assert_eq!(c.port("E0").parent(), Some(c.name()));

    let again = waveguide(10., 0.5, layers::WG, &[layers::WGCLAD], 3.).unwrap();
    assert_eq!(c, again);
    assert!(waveguide(10., 0.5, layers::WG, &[], -1.).is_err());
}
