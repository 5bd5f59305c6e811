//! Transformation types and traits.

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// A rigid transformation: an optional reflection across the x-axis,
/// followed by a counterclockwise rotation about the origin,
/// followed by a translation.
///
/// Rotations by arbitrary angles are stored as a real-valued matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    /// The transformation matrix.
    pub(crate) a: [[f64; 2]; 2],
    /// The x-y translation applied after the transformation.
    pub(crate) b: Point,
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transformation {
    /// Returns the identity transform, leaving any transformed object unmodified.
    pub fn identity() -> Self {
        Self {
            a: [[1., 0.], [0., 1.]],
            b: Point::zero(),
        }
    }

    /// Returns a translation by `(x,y)`.
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            a: [[1., 0.], [0., 1.]],
            b: Point::new(x, y),
        }
    }

    /// Returns a counterclockwise rotation by `angle` degrees about the origin.
    ///
    /// Multiples of 90 degrees produce exact matrices.
    pub fn rotate(angle: f64) -> Self {
        let (sin, cos) = exact_sin_cos(angle);
        Self {
            a: [[cos, -sin], [sin, cos]],
            b: Point::zero(),
        }
    }

    /// Returns a reflection about the x-axis.
    pub fn reflect_vert() -> Self {
        Self {
            a: [[1., 0.], [0., -1.]],
            b: Point::zero(),
        }
    }

    /// Create a new [`Transformation`] that applies `first`, then `second`.
    ///
    /// Note this operation *is not* commutative.
    pub fn cascade(first: Transformation, second: Transformation) -> Self {
        let a = matmul(&second.a, &first.a);
        let b = second.apply(first.b);
        Self { a, b }
    }

    /// The translation applied by this transformation.
    #[inline]
    pub fn offset_point(&self) -> Point {
        self.b
    }

    /// Applies this transformation to a single point.
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a[0][0] * p.x + self.a[0][1] * p.y + self.b.x,
            self.a[1][0] * p.x + self.a[1][1] * p.y + self.b.y,
        )
    }
}

/// Sine and cosine of an angle in degrees, exact at multiples of 90 degrees.
pub(crate) fn exact_sin_cos(angle: f64) -> (f64, f64) {
    let wrapped = crate::wrap_angle(angle);
    if wrapped == 0. {
        (0., 1.)
    } else if wrapped == 90. {
        (1., 0.)
    } else if wrapped == 180. {
        (0., -1.)
    } else if wrapped == 270. {
        (-1., 0.)
    } else {
        angle.to_radians().sin_cos()
    }
}

/// Multiplies two 2x2 matrices.
fn matmul(a: &[[f64; 2]; 2], b: &[[f64; 2]; 2]) -> [[f64; 2]; 2] {
    [
        [
            a[0][0] * b[0][0] + a[0][1] * b[1][0],
            a[0][0] * b[0][1] + a[0][1] * b[1][1],
        ],
        [
            a[1][0] * b[0][0] + a[1][1] * b[1][0],
            a[1][0] * b[0][1] + a[1][1] * b[1][1],
        ],
    ]
}

/// A trait for specifying how an object is changed by a [`Transformation`].
pub trait TransformMut {
    /// Applies matrix-vector [`Transformation`] `trans`.
    fn transform_mut(&mut self, trans: Transformation);
}

impl<T: TransformMut> TransformMut for Vec<T> {
    fn transform_mut(&mut self, trans: Transformation) {
        for i in self.iter_mut() {
            i.transform_mut(trans);
        }
    }
}

impl<T: TransformMut> TransformMut for Option<T> {
    fn transform_mut(&mut self, trans: Transformation) {
        if let Some(inner) = self.as_mut() {
            inner.transform_mut(trans);
        }
    }
}

/// A trait for specifying how an object is changed by a [`Transformation`].
///
/// Takes in an owned copy of the shape and returns the transformed version.
pub trait Transform: TransformMut + Sized {
    /// Applies matrix-vector [`Transformation`] `trans`.
    ///
    /// Creates a new shape at a location equal to the transformation of the original.
    #[inline]
    fn transform(mut self, trans: Transformation) -> Self {
        self.transform_mut(trans);
        self
    }
}

impl<T: TransformMut + Sized> Transform for T {}

/// A trait for specifying how a shape is translated by a [`Point`].
pub trait TranslateMut {
    /// Translates the shape by a [`Point`] through mutation.
    fn translate_mut(&mut self, p: Point);
}

impl<T: TranslateMut> TranslateMut for Vec<T> {
    fn translate_mut(&mut self, p: Point) {
        for i in self.iter_mut() {
            i.translate_mut(p);
        }
    }
}

impl<T: TranslateMut> TranslateMut for Option<T> {
    fn translate_mut(&mut self, p: Point) {
        if let Some(inner) = self.as_mut() {
            inner.translate_mut(p);
        }
    }
}

/// A trait for specifying how a shape is translated by a [`Point`].
///
/// Takes in an owned copy of the shape and returns the translated version.
pub trait Translate: TranslateMut + Sized {
    /// Translates the shape by a [`Point`] through mutation.
    ///
    /// Creates a new shape at a location equal to the translation of the original.
    fn translate(mut self, p: Point) -> Self {
        self.translate_mut(p);
        self
    }
}

impl<T: TranslateMut + Sized> Translate for T {}
