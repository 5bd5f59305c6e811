//! An import prelude that re-exports commonly used items.

pub use crate::compass::Compass;
pub use crate::point::Point;
pub use crate::polygon::Polygon;
pub use crate::polyline;
pub use crate::simplify::douglas_peucker;
pub use crate::transform::{Transform, TransformMut, Transformation, Translate, TranslateMut};
pub use crate::{shortest_turn, wrap_angle};
