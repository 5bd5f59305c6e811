//! Straight, circular and Euler path primitives.
//!
//! Every primitive starts at the origin heading east.

use std::f64::consts::SQRT_2;

use geometry::prelude::*;

use super::{BendRadii, Path};
use crate::error::{Result, SpecificationError};

/// Terms of the power series used to evaluate Fresnel integrals.
const FRESNEL_TERMS: i32 = 8;

fn positive(name: &'static str, value: f64) -> Result<f64, SpecificationError> {
    if value.is_finite() && value > 0. {
        Ok(value)
    } else {
        Err(SpecificationError::InvalidParam { name, value })
    }
}

fn turn(angle: f64) -> Result<f64, SpecificationError> {
    if angle.is_finite() && angle != 0. {
        Ok(angle)
    } else {
        Err(SpecificationError::InvalidParam {
            name: "angle",
            value: angle,
        })
    }
}

/// Number of samples for a turn of `angle` degrees at `npoints` per full circle.
fn samples(npoints: usize, angle: f64) -> usize {
    ((npoints as f64 * angle / 360.).abs() as usize).max(2)
}

fn linspace(start: f64, stop: f64, num: usize) -> impl Iterator<Item = f64> {
    let step = if num > 1 {
        (stop - start) / (num - 1) as f64
    } else {
        0.
    };
    (0..num).map(move |i| {
        if i + 1 == num && num > 1 {
            stop
        } else {
            start + step * i as f64
        }
    })
}

/// A straight path of `length` along +x, sampled at `npoints` evenly spaced points.
///
/// Sampling a straight section finely lets sampled widths and offsets vary smoothly.
pub fn straight(length: f64, npoints: usize) -> Result<Path> {
    let length = positive("length", length)?;
    if npoints < 2 {
        return Err(SpecificationError::InvalidParam {
            name: "npoints",
            value: npoints as f64,
        }
        .into());
    }
    let ends = [Point::zero(), Point::new(length, 0.)];
    Path::new(polyline::resample(&ends, npoints), 0., 0.)
}

/// A circular arc of `radius` turning by `angle` degrees.
///
/// Positive angles turn counterclockwise. `npoints` is the number of samples
/// per 360 degrees of turn.
///
/// # Example
///
/// ```
/// # use photonics::path::arc;
/// let bend = arc(10., 90., 720).unwrap();
/// assert_eq!(bend.start().x, 0.);
/// assert_eq!(bend.end().x, 10.);
/// assert_eq!(bend.end().y, 10.);
/// assert_eq!(bend.end_angle(), 90.);
/// ```
pub fn arc(radius: f64, angle: f64, npoints: usize) -> Result<Path> {
    let radius = positive("radius", radius)?;
    let angle = turn(angle)?;
    let sign = angle.signum();
    let points = linspace(-90., angle - 90., samples(npoints, angle))
        .map(|t| {
            let c = Point::from_angle(t);
            Point::new(radius * c.x, radius * (c.y + 1.)) * sign
        })
        .collect();
    Ok(Path::new(points, 0., angle)?.with_radii(BendRadii {
        effective: radius,
        min: radius,
    }))
}

/// Settings of an Euler bend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerParams {
    /// Minimum radius of curvature, or the effective radius if `use_eff` is set.
    pub radius: f64,
    /// Total turn in degrees.
    pub angle: f64,
    /// Fraction of the bend that follows a clothoid, in `(0, 1]`.
    pub p: f64,
    /// Scale the bend so that its endpoints match an arc of `radius`.
    pub use_eff: bool,
    /// Samples per 360 degrees of turn.
    pub npoints: usize,
}

impl Default for EulerParams {
    fn default() -> Self {
        Self {
            radius: 10.,
            angle: 90.,
            p: 1.,
            use_eff: false,
            npoints: 720,
        }
    }
}

/// Samples the Fresnel integrals `(C, S)` along a clothoid of arc length `s`
/// and scale `r0`.
fn fresnel(r0: f64, s: f64, num: usize) -> Vec<Point> {
    linspace(0., s / (SQRT_2 * r0), num)
        .map(|t| {
            let mut x = 0.;
            let mut y = 0.;
            let mut fact_even = 1.;
            let mut fact_odd = 1.;
            for n in 0..FRESNEL_TERMS {
                if n > 0 {
                    fact_even = fact_odd * (2 * n) as f64;
                }
                fact_odd = fact_even * (2 * n + 1) as f64;
                let sign = if n % 2 == 0 { 1. } else { -1. };
                x += sign * t.powi(4 * n + 1) / (fact_even * (4 * n + 1) as f64);
                y += sign * t.powi(4 * n + 3) / (fact_odd * (4 * n + 3) as f64);
            }
            Point::new(x, y) * (SQRT_2 * r0)
        })
        .collect()
}

/// An Euler bend that transitions adiabatically from straight to curved.
///
/// With `p < 1` the middle of the bend is a circular arc and only the fraction
/// `p` follows a clothoid ("partial Euler"). The returned path records its
/// effective and minimum radii.
///
/// # Example
///
/// ```
/// # use photonics::path::euler;
/// # use approx::assert_abs_diff_eq;
/// let bend = euler(10., 90., 1., true, 720).unwrap();
/// assert_abs_diff_eq!(bend.end().x, 10., epsilon = 1e-6);
/// assert_abs_diff_eq!(bend.end().y, 10., epsilon = 1e-6);
/// let radii = bend.radii().unwrap();
/// assert!(radii.min < radii.effective);
/// ```
pub fn euler(radius: f64, angle: f64, p: f64, use_eff: bool, npoints: usize) -> Result<Path> {
    euler_with(EulerParams {
        radius,
        angle,
        p,
        use_eff,
        npoints,
    })
}

/// [`euler`] taking its settings as a struct.
pub fn euler_with(params: EulerParams) -> Result<Path> {
    let radius = positive("radius", params.radius)?;
    let angle = turn(params.angle)?;
    let p = params.p;
    if !(p > 0. && p <= 1.) {
        return Err(SpecificationError::InvalidParam {
            name: "p",
            value: p,
        }
        .into());
    }
    if angle < 0. {
        return Ok(euler_with(EulerParams {
            angle: -angle,
            ..params
        })?
        .mirror_x());
    }

    let alpha = angle.to_radians();
    let r0 = 1.;
    let rp = r0 / (p * alpha).sqrt();
    let sp = r0 * (p * alpha).sqrt();
    let s0 = 2. * sp + rp * alpha * (1. - p);

    let num = samples(params.npoints, angle);
    let num_euler = ((sp / (s0 / 2.) * num as f64).round() as usize).max(2);
    let num_arc = num.saturating_sub(num_euler);

    let mut half = fresnel(r0, sp, num_euler);
    let xp = half[half.len() - 1];
    let dx = xp.x - rp * (p * alpha / 2.).sin();
    let dy = xp.y - rp * (1. - (p * alpha / 2.).cos());
    half.extend(linspace(sp, s0 / 2., num_arc).skip(1).map(|s| {
        let phi = (s - sp) / rp + p * alpha / 2.;
        Point::new(rp * phi.sin() + dx, rp * (1. - phi.cos()) + dy)
    }));

    // The second half is the first, reflected, reversed and rotated onto its end.
    let last = half[half.len() - 1];
    let rotation = Transformation::rotate(angle - 180.);
    let mirrored: Vec<Point> = half
        .iter()
        .rev()
        .map(|q| rotation.apply(Point::new(q.x, -q.y)))
        .collect();
    let shift = last - mirrored[0];

    let mut points = half;
    points.pop();
    points.extend(mirrored.into_iter().map(|q| q + shift));

    let end = points[points.len() - 1];
    let reff = if (180. - angle).abs() < 1e-3 {
        end.y / 2.
    } else {
        end.y - (angle - 90.).to_radians().tan() * end.x
    };
    let scale = if params.use_eff { radius / reff } else { radius / rp };
    let points: Vec<Point> = points.into_iter().map(|q| q * scale).collect();

    tracing::trace!(
        angle,
        p,
        effective_radius = reff * scale,
        min_radius = rp * scale,
        "generated euler bend"
    );

    Ok(Path::new(points, 0., angle)?.with_radii(BendRadii {
        effective: reff * scale,
        min: rp * scale,
    }))
}
