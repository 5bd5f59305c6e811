//! Real-coordinate polygons.

use serde::{Deserialize, Serialize};

use crate::point::Point;
use crate::snap::snap_to_grid_nm;
use crate::transform::{TransformMut, Transformation, TranslateMut};

/// A closed polygon ring, with vertex coordinates given in traversal order.
///
/// The closing edge from the last vertex back to the first is implicit.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Polygon {
    /// Vector of points that make up the polygon.
    points: Vec<Point>,
}

impl Polygon {
    /// Creates a polygon with given vertices.
    pub fn from_verts(vec: Vec<Point>) -> Self {
        Self { points: vec }
    }

    /// Returns a the vector of points representing the polygon.
    pub fn points(&self) -> &Vec<Point> {
        &self.points
    }

    /// Consumes the polygon, returning its vertices.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// The number of vertices in the polygon.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the polygon has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the signed area of the polygon using the shoelace formula.
    ///
    /// Counterclockwise rings have positive area.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let polygon = Polygon::from_verts(vec![
    ///     Point::new(0., 0.),
    ///     Point::new(2., 0.),
    ///     Point::new(2., 1.),
    ///     Point::new(0., 1.),
    /// ]);
    /// assert_eq!(polygon.signed_area(), 2.);
    /// ```
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        let twice: f64 = (0..n)
            .map(|i| self.points[i].cross(self.points[(i + 1) % n]))
            .sum();
        twice / 2.
    }

    /// Returns the unsigned area of the polygon.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Returns `true` if every vertex has finite coordinates.
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(Point::is_finite)
    }

    /// Returns the bottom-left and top-right corners of the bounding box,
    /// or [`None`] if the polygon is empty.
    pub fn bbox(&self) -> Option<(Point, Point)> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }

    /// Snaps every vertex to the nearest multiple of `grid` nanometers.
    pub fn snap_to_grid_nm(&self, grid: u32) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|p| Point::new(snap_to_grid_nm(p.x, grid), snap_to_grid_nm(p.y, grid)))
                .collect(),
        }
    }
}

impl TranslateMut for Polygon {
    fn translate_mut(&mut self, p: Point) {
        self.points.translate_mut(p);
    }
}

impl TransformMut for Polygon {
    fn transform_mut(&mut self, trans: Transformation) {
        self.points.transform_mut(trans);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clockwise_rings_have_negative_signed_area() {
        let polygon = Polygon::from_verts(vec![
            Point::new(0., 1.),
            Point::new(3., 1.),
            Point::new(3., -1.),
            Point::new(0., -1.),
        ]);
        assert_eq!(polygon.signed_area(), -6.);
        assert_eq!(polygon.area(), 6.);
    }

    #[test]
    fn bbox_covers_all_vertices() {
        let polygon = Polygon::from_verts(vec![
            Point::new(0., 0.),
            Point::new(1., 2.),
            Point::new(-4., 5.),
        ]);
        assert_eq!(
            polygon.bbox(),
            Some((Point::new(-4., 0.), Point::new(1., 5.)))
        );
        assert_eq!(Polygon::default().bbox(), None);
    }
}
