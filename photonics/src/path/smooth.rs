//! Smooth paths through waypoints.

use geometry::prelude::*;

use super::primitives::{self, EulerParams};
use super::{heading, Path};
use crate::error::{Result, SpecificationError};

/// Turns smaller than this, in degrees, are treated as straight.
const STRAIGHT_TOL: f64 = 1e-9;
/// Points of consecutive corners closer than this are merged.
const JOIN_TOL: f64 = 1e-9;
/// Relative slack allowed when corners exactly fill a segment.
const SPACING_SLACK: f64 = 1e-9;

/// Generates the curve that rounds one corner.
///
/// The curve must start at the origin heading east and turn by `angle`
/// degrees. Its effective radius is measured from its chord, so it may differ
/// from `radius`.
pub trait CornerGenerator {
    /// Returns the corner curve for a turn of `angle` degrees.
    fn corner(&self, radius: f64, angle: f64) -> Result<Path>;
}

impl<F> CornerGenerator for F
where
    F: Fn(f64, f64) -> Result<Path>,
{
    fn corner(&self, radius: f64, angle: f64) -> Result<Path> {
        self(radius, angle)
    }
}

/// Rounds corners with circular arcs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arc {
    /// Samples per 360 degrees of turn.
    pub npoints: usize,
}

impl Default for Arc {
    fn default() -> Self {
        Self { npoints: 720 }
    }
}

impl Arc {
    pub fn from_config(config: &config::Config) -> Self {
        Self {
            npoints: config.path.npoints,
        }
    }
}

impl CornerGenerator for Arc {
    fn corner(&self, radius: f64, angle: f64) -> Result<Path> {
        primitives::arc(radius, angle, self.npoints)
    }
}

/// Rounds corners with (partial) Euler bends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Euler {
    /// Fraction of each bend that follows a clothoid.
    pub p: f64,
    /// Interpret the radius as the effective radius.
    pub use_eff: bool,
    /// Samples per 360 degrees of turn.
    pub npoints: usize,
}

impl Default for Euler {
    fn default() -> Self {
        Self {
            p: 1.,
            use_eff: false,
            npoints: 720,
        }
    }
}

impl Euler {
    pub fn from_config(config: &config::Config) -> Self {
        Self {
            npoints: config.path.npoints,
            ..Default::default()
        }
    }
}

impl CornerGenerator for Euler {
    fn corner(&self, radius: f64, angle: f64) -> Result<Path> {
        primitives::euler_with(EulerParams {
            radius,
            angle,
            p: self.p,
            use_eff: self.use_eff,
            npoints: self.npoints,
        })
    }
}

struct Corner {
    path: Path,
    /// Distance the corner consumes along each adjacent segment.
    encroachment: f64,
}

/// Builds a path through `waypoints`, rounding each interior waypoint with a
/// curve from `corner`.
///
/// Fails if fewer than 3 waypoints are given, if two consecutive waypoints
/// coincide, if a waypoint turns back by 180 degrees, or if the corners at the
/// two ends of a segment do not fit in its length.
///
/// # Example
///
/// ```
/// # use photonics::path::smooth::{smooth, Arc};
/// let path = smooth([(0., 0.), (10., 0.), (10., 10.)], 2., &Arc::default()).unwrap();
/// assert_eq!(path.start().x, 0.);
/// assert_eq!(path.end().y, 10.);
/// assert_eq!(path.end_angle(), 90.);
/// ```
pub fn smooth<P, C>(waypoints: impl IntoIterator<Item = P>, radius: f64, corner: &C) -> Result<Path>
where
    P: Into<Point>,
    C: CornerGenerator + ?Sized,
{
    let points: Vec<Point> = waypoints.into_iter().map(Into::into).collect();
    if points.len() < 3 {
        return Err(SpecificationError::TooFewPoints {
            required: 3,
            found: points.len(),
        }
        .into());
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(SpecificationError::NonFinitePoint { index }.into());
    }
    if let Some(index) = polyline::first_coincident(&points, 0.) {
        return Err(SpecificationError::CoincidentPoints { index }.into());
    }
    if !(radius.is_finite() && radius > 0.) {
        return Err(SpecificationError::InvalidParam {
            name: "radius",
            value: radius,
        }
        .into());
    }

    let lengths: Vec<f64> = points.windows(2).map(|w| w[0].distance(w[1])).collect();
    let theta: Vec<f64> = points.windows(2).map(|w| heading(w[0], w[1])).collect();
    let directions: Vec<Point> = points
        .windows(2)
        .zip(&lengths)
        .map(|(w, len)| (w[1] - w[0]) * (1. / len))
        .collect();

    let mut corners = Vec::with_capacity(points.len() - 2);
    for (j, t) in theta.windows(2).enumerate() {
        let waypoint = j + 1;
        let dt = shortest_turn(t[1] - t[0]);
        if dt.abs() < STRAIGHT_TOL {
            corners.push(None);
            continue;
        }
        if (dt.abs() - 180.).abs() < STRAIGHT_TOL {
            return Err(SpecificationError::UnroundableTurn { waypoint, angle: dt }.into());
        }

        let path = corner.corner(radius, dt)?;
        let chord = path.start().distance(path.end());
        let r = ((chord / 2.) / (dt / 2.).to_radians().sin()).abs();
        let encroachment = (r / ((180. - dt).to_radians() / 2.).tan()).abs();
        if !(chord > 0. && encroachment.is_finite()) {
            return Err(SpecificationError::InvalidCorner { waypoint }.into());
        }
        tracing::debug!(waypoint, turn = dt, radius = r, encroachment, "placing corner");
        corners.push(Some(Corner { path, encroachment }));
    }

    let encroachment_at = |i: usize| -> f64 {
        corners
            .get(i)
            .and_then(Option::as_ref)
            .map_or(0., |c| c.encroachment)
    };
    for (segment, &available) in lengths.iter().enumerate() {
        // Segment `i` runs from waypoint `i` to `i + 1`; corner `j` sits at waypoint `j + 1`.
        let before = if segment > 0 { encroachment_at(segment - 1) } else { 0. };
        let required = before + encroachment_at(segment);
        if required > available * (1. + SPACING_SLACK) {
            return Err(SpecificationError::InsufficientSpacing {
                segment,
                required,
                available,
            }
            .into());
        }
    }

    let mut out = vec![points[0]];
    for (j, corner) in corners.into_iter().enumerate() {
        let Some(Corner { path, encroachment }) = corner else {
            continue;
        };
        let origin = points[j + 1] - directions[j] * encroachment;
        let placed = path.rotate(theta[j]).translate(origin);
        polyline::extend_dedup(&mut out, placed.into_points(), JOIN_TOL);
    }
    polyline::extend_dedup(&mut out, [points[points.len() - 1]], JOIN_TOL);

    Path::new(out, theta[0], theta[theta.len() - 1])
}
