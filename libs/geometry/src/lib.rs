//! 2-D geometric operations relevant to photonic integrated circuit layout.
//!
//! Coordinates are real-valued and expressed in microns.
//!
//! # Examples
//!
//! Offset a polyline to its left:
//!
//! ```
//! # use geometry::prelude::*;
//! let points = [Point::new(0., 0.), Point::new(10., 0.)];
//! let left = polyline::parametric_offset(&points, &[1., 1.], 0., 0.);
//! assert_eq!(left, vec![Point::new(0., 1.), Point::new(10., 1.)]);
//! ```
#![warn(missing_docs)]

extern crate self as geometry;

pub mod compass;
pub mod point;
pub mod polygon;
pub mod polyline;
pub mod prelude;
pub mod simplify;
pub mod snap;
pub mod transform;

/// Wraps the given angle to the interval `[0, 360)` degrees.
///
/// # Examples
///
/// ```
/// use geometry::wrap_angle;
///
/// assert_eq!(wrap_angle(10.), 10.);
/// assert_eq!(wrap_angle(-10.), 350.);
/// assert_eq!(wrap_angle(-740.), 340.);
/// assert_eq!(wrap_angle(-359.), 1.);
/// assert_eq!(wrap_angle(-1.), 359.);
/// assert_eq!(wrap_angle(725.), 5.);
/// assert_eq!(wrap_angle(360.), 0.);
/// assert_eq!(wrap_angle(-360.), 0.);
/// ```
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = ((angle % 360.) + 360.) % 360.;
    // `-1e-20 % 360 + 360` rounds to exactly 360.
    if wrapped >= 360. {
        0.
    } else {
        wrapped
    }
}

/// Normalizes a turn angle to the shortest signed turn, in `[-180, 180)` degrees.
///
/// # Examples
///
/// ```
/// use geometry::shortest_turn;
///
/// assert_eq!(shortest_turn(90.), 90.);
/// assert_eq!(shortest_turn(270.), -90.);
/// assert_eq!(shortest_turn(-270.), 90.);
/// assert_eq!(shortest_turn(180.), -180.);
/// ```
pub fn shortest_turn(angle: f64) -> f64 {
    angle - 360. * ((angle + 180.) / 360.).floor()
}
