//! Path centerlines.
//!
//! A [`Path`] is an ordered list of sample points plus the tangent angles at
//! its two ends. Paths come from the primitives in [`primitives`], from
//! [`smooth`](smooth::smooth), or from composing other paths with [`Path::append`].

use geometry::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cross_section::Param;
use crate::error::{Result, SpecificationError};

pub mod primitives;
pub mod smooth;
#[cfg(test)]
mod tests;

pub use primitives::{arc, euler, straight};
pub use smooth::{smooth, CornerGenerator};

/// Radii of curvature recorded by bend primitives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BendRadii {
    /// Radius of the circular arc with the same endpoints and turn angle.
    pub effective: f64,
    /// Smallest radius of curvature along the bend.
    pub min: f64,
}

/// A sampled centerline with start and end tangent angles, in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    points: Vec<Point>,
    start_angle: f64,
    end_angle: f64,
    radii: Option<BendRadii>,
}

fn validate(points: &[Point]) -> Result<(), SpecificationError> {
    if points.len() < 2 {
        return Err(SpecificationError::TooFewPoints {
            required: 2,
            found: points.len(),
        });
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(SpecificationError::NonFinitePoint { index });
    }
    if let Some(index) = polyline::first_coincident(points, 0.) {
        return Err(SpecificationError::CoincidentPoints { index });
    }
    Ok(())
}

/// Direction of travel from `a` to `b`, in degrees.
#[inline]
pub(crate) fn heading(a: Point, b: Point) -> f64 {
    (b - a).angle()
}

impl Path {
    /// Creates a path with explicit end tangents.
    ///
    /// Fails if there are fewer than 2 points, if a coordinate is not finite,
    /// or if two consecutive points coincide.
    pub fn new(points: Vec<Point>, start_angle: f64, end_angle: f64) -> Result<Self> {
        validate(&points)?;
        Ok(Self {
            points,
            start_angle,
            end_angle,
            radii: None,
        })
    }

    /// Creates a path whose end tangents follow its first and last segments.
    ///
    /// # Example
    ///
    /// ```
    /// # use photonics::path::Path;
    /// let path = Path::from_points([(0., 0.), (10., 0.), (10., 5.)]).unwrap();
    /// assert_eq!(path.start_angle(), 0.);
    /// assert_eq!(path.end_angle(), 90.);
    /// assert_eq!(path.length(), 15.);
    /// ```
    pub fn from_points<P: Into<Point>>(points: impl IntoIterator<Item = P>) -> Result<Self> {
        let points: Vec<Point> = points.into_iter().map(Into::into).collect();
        validate(&points)?;
        Ok(Self::from_points_unchecked(points))
    }

    /// Builds a path from points without validation, deriving the end tangents
    /// from the first and last segments.
    pub(crate) fn from_points_unchecked(points: Vec<Point>) -> Self {
        let n = points.len();
        let (start_angle, end_angle) = if n >= 2 {
            (
                heading(points[0], points[1]),
                heading(points[n - 2], points[n - 1]),
            )
        } else {
            (0., 0.)
        };
        Self {
            points,
            start_angle,
            end_angle,
            radii: None,
        }
    }

    pub(crate) fn with_radii(mut self, radii: BendRadii) -> Self {
        self.radii = Some(radii);
        self
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// The first point.
    #[inline]
    pub fn start(&self) -> Point {
        self.points[0]
    }

    /// The last point.
    #[inline]
    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    #[inline]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    #[inline]
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// The radii recorded by the bend primitive that produced this path, if any.
    #[inline]
    pub fn radii(&self) -> Option<BendRadii> {
        self.radii
    }

    /// Total arc length.
    pub fn length(&self) -> f64 {
        polyline::length(&self.points)
    }

    /// Arc length at each point as a fraction of [`Path::length`].
    pub fn normalized_lengths(&self) -> Vec<f64> {
        polyline::normalized_lengths(&self.points)
    }

    /// Rotates the path counterclockwise about the origin by `angle` degrees.
    pub fn rotate_mut(&mut self, angle: f64) {
        self.points.transform_mut(Transformation::rotate(angle));
        self.start_angle += angle;
        self.end_angle += angle;
    }

    /// Owned variant of [`Path::rotate_mut`].
    pub fn rotate(mut self, angle: f64) -> Self {
        self.rotate_mut(angle);
        self
    }

    /// Reflects the path across the x-axis.
    pub fn mirror_x_mut(&mut self) {
        self.points.transform_mut(Transformation::reflect_vert());
        self.start_angle = -self.start_angle;
        self.end_angle = -self.end_angle;
    }

    /// Owned variant of [`Path::mirror_x_mut`].
    pub fn mirror_x(mut self) -> Self {
        self.mirror_x_mut();
        self
    }

    /// Attaches `other` to the end of this path.
    ///
    /// `other` is rotated so that its start tangent continues this path's end
    /// tangent, then moved so that its first point lands on this path's last point.
    ///
    /// # Example
    ///
    /// ```
    /// # use photonics::path::{arc, straight};
    /// # use approx::assert_abs_diff_eq;
    /// let mut path = straight(5., 2).unwrap();
    /// path.append(&arc(10., 90., 720).unwrap());
    /// path.append(&straight(5., 2).unwrap());
    /// assert_abs_diff_eq!(path.end().x, 15., epsilon = 1e-9);
    /// assert_abs_diff_eq!(path.end().y, 15., epsilon = 1e-9);
    /// assert_abs_diff_eq!(path.end_angle(), 90., epsilon = 1e-9);
    /// ```
    pub fn append(&mut self, other: &Path) -> &mut Self {
        let mut next = other.clone().rotate(self.end_angle - other.start_angle);
        let shift = self.end() - next.start();
        next.translate_mut(shift);
        self.points.extend(next.points.into_iter().skip(1));
        self.end_angle = next.end_angle;
        self.radii = None;
        self
    }

    /// Returns a copy shifted sideways by `offset`, positive to the left.
    ///
    /// End tangents are kept for a constant offset. A sampled offset changes the
    /// shape of the curve, so the copy's end tangents follow its own end segments.
    pub fn offset(&self, offset: &Param) -> Result<Path> {
        let shifted = self.shifted(&offset.sample(&self.normalized_lengths()), !offset.is_constant());
        validate(&shifted.points)?;
        Ok(shifted)
    }

    /// Offsets each point by the matching distance without validating the result.
    pub(crate) fn shifted(&self, distances: &[f64], recompute_angles: bool) -> Path {
        let points =
            polyline::parametric_offset(&self.points, distances, self.start_angle, self.end_angle);
        if recompute_angles {
            Path::from_points_unchecked(points)
        } else {
            Path {
                points,
                start_angle: self.start_angle,
                end_angle: self.end_angle,
                radii: None,
            }
        }
    }
}

impl TranslateMut for Path {
    fn translate_mut(&mut self, p: Point) {
        self.points.translate_mut(p);
    }
}
