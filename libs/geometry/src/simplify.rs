//! Polyline simplification.

use crate::point::Point;

/// Ramer–Douglas–Peucker polyline simplification.
///
/// Removes every point that can be dropped without moving the polyline by more
/// than `tolerance`. The first and last points are always kept, and the result
/// is a subsequence of the input.
///
/// # Example
///
/// ```
/// # use geometry::prelude::*;
/// let points = [
///     Point::new(0., 0.),
///     Point::new(1., 0.01),
///     Point::new(2., 0.),
///     Point::new(3., 1.),
/// ];
/// let simplified = douglas_peucker(&points, 0.1);
/// assert_eq!(simplified, vec![Point::new(0., 0.), Point::new(2., 0.), Point::new(3., 1.)]);
/// ```
pub fn douglas_peucker(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    let mut stack = vec![(0, points.len() - 1)];
    while let Some((first, last)) = stack.pop() {
        if last <= first + 1 {
            continue;
        }
        let mut dmax = 0.;
        let mut index = first;
        for i in first + 1..last {
            let d = line_distance(points[i], points[first], points[last]);
            if d > dmax {
                dmax = d;
                index = i;
            }
        }
        if dmax > tolerance {
            keep[index] = true;
            stack.push((first, index));
            stack.push((index, last));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

/// Perpendicular distance from `p` to the line through `a` and `b`.
///
/// Falls back to the distance from `a` when the line is degenerate.
fn line_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len = ab.norm();
    if len == 0. {
        return p.distance(a);
    }
    (ab.cross(p - a) / len).abs()
}
