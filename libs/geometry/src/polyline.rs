//! Polyline utilities: arc length, resampling, and parametric offset curves.
//!
//! A polyline is an ordered slice of [`Point`]s; the order is the direction of travel.

use crate::point::Point;

/// Cumulative arc length at each point, starting at 0.
///
/// # Example
///
/// ```
/// # use geometry::prelude::*;
/// let points = [Point::new(0., 0.), Point::new(3., 4.), Point::new(3., 6.)];
/// assert_eq!(polyline::cumulative_lengths(&points), vec![0., 5., 7.]);
/// ```
pub fn cumulative_lengths(points: &[Point]) -> Vec<f64> {
    let mut out = Vec::with_capacity(points.len());
    let mut total = 0.;
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            total += p.distance(points[i - 1]);
        }
        out.push(total);
    }
    out
}

/// Arc length at each point as a fraction of the total length:
/// 0 at the first point and 1 at the last.
///
/// A polyline of zero total length maps every point to 0.
pub fn normalized_lengths(points: &[Point]) -> Vec<f64> {
    let lengths = cumulative_lengths(points);
    let total = lengths.last().copied().unwrap_or_default();
    if total > 0. {
        lengths.into_iter().map(|l| l / total).collect()
    } else {
        vec![0.; lengths.len()]
    }
}

/// Total arc length of the polyline.
pub fn length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Finite-difference tangent vectors at each point.
///
/// Interior points use central differences; the first and last points use
/// one-sided differences. Vectors are not normalized.
pub fn gradient(points: &[Point]) -> Vec<Point> {
    let n = points.len();
    if n < 2 {
        return vec![Point::zero(); n];
    }
    (0..n)
        .map(|i| {
            if i == 0 {
                points[1] - points[0]
            } else if i == n - 1 {
                points[n - 1] - points[n - 2]
            } else {
                (points[i + 1] - points[i - 1]) * 0.5
            }
        })
        .collect()
}

/// Offsets each point along its left-hand normal by the corresponding entry of `distances`.
///
/// Tangents are estimated with [`gradient`], except at the two ends, where the
/// tangent is taken from `start_angle` and `end_angle` (in degrees) so that the
/// offset curve ends square to the path. Negative distances offset to the right.
///
/// Degenerate tangents produce non-finite coordinates; callers are expected to
/// check the result.
///
/// # Panics
///
/// Panics if `distances` and `points` differ in length.
pub fn parametric_offset(
    points: &[Point],
    distances: &[f64],
    start_angle: f64,
    end_angle: f64,
) -> Vec<Point> {
    assert_eq!(
        points.len(),
        distances.len(),
        "one offset distance is required per point"
    );
    let mut tangents = gradient(points);
    let n = tangents.len();
    if n > 0 {
        tangents[0] = Point::from_angle(start_angle);
        tangents[n - 1] = Point::from_angle(end_angle);
    }
    points
        .iter()
        .zip(tangents)
        .zip(distances)
        .map(|((p, t), d)| {
            let norm = t.norm();
            let normal = Point::new(-t.y / norm, t.x / norm);
            *p + normal * *d
        })
        .collect()
}

/// Resamples the polyline at `num` points evenly spaced in arc length.
///
/// The first and last points are preserved exactly.
///
/// # Panics
///
/// Panics if `num < 2` or the polyline has fewer than 2 points.
///
/// # Example
///
/// ```
/// # use geometry::prelude::*;
/// let points = [Point::new(0., 0.), Point::new(4., 0.)];
/// let resampled = polyline::resample(&points, 5);
/// assert_eq!(resampled[1], Point::new(1., 0.));
/// assert_eq!(resampled[4], Point::new(4., 0.));
/// ```
pub fn resample(points: &[Point], num: usize) -> Vec<Point> {
    assert!(num >= 2, "resampling requires at least 2 output points");
    assert!(points.len() >= 2, "resampling requires at least 2 input points");
    let lengths = cumulative_lengths(points);
    let total = lengths[lengths.len() - 1];
    let mut out = Vec::with_capacity(num);
    let mut seg = 0;
    for i in 0..num {
        if i == num - 1 {
            out.push(points[points.len() - 1]);
            break;
        }
        let target = total * i as f64 / (num - 1) as f64;
        while seg + 2 < points.len() && lengths[seg + 1] < target {
            seg += 1;
        }
        let span = lengths[seg + 1] - lengths[seg];
        let t = if span > 0. {
            (target - lengths[seg]) / span
        } else {
            0.
        };
        out.push(points[seg] + (points[seg + 1] - points[seg]) * t);
    }
    out
}

/// Returns the index of the first point that coincides (within `tol`) with its predecessor.
pub fn first_coincident(points: &[Point], tol: f64) -> Option<usize> {
    points
        .windows(2)
        .position(|w| w[0].distance(w[1]) <= tol)
        .map(|i| i + 1)
}

/// Appends `points` to `out`, skipping any point that coincides (within `tol`)
/// with the point before it.
pub fn extend_dedup(out: &mut Vec<Point>, points: impl IntoIterator<Item = Point>, tol: f64) {
    for p in points {
        match out.last() {
            Some(last) if last.distance(p) <= tol => {}
            _ => out.push(p),
        }
    }
}
