//! Compass sides used to classify port orientations.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::wrap_angle;

/// One of the four compass sides a port can face.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Compass {
    /// East, facing along +x.
    E,
    /// North, facing along +y.
    N,
    /// West, facing along -x.
    W,
    /// South, facing along -y.
    S,
}

impl Compass {
    /// All sides, in counterclockwise order starting from east.
    pub const ALL: [Compass; 4] = [Compass::E, Compass::N, Compass::W, Compass::S];

    /// Classifies an orientation, in degrees, into a compass side.
    ///
    /// Angles on a 45 degree diagonal belong to the first matching side in
    /// east, north, west, south order.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// assert_eq!(Compass::from_angle(0.), Compass::E);
    /// assert_eq!(Compass::from_angle(45.), Compass::E);
    /// assert_eq!(Compass::from_angle(135.), Compass::N);
    /// assert_eq!(Compass::from_angle(225.), Compass::W);
    /// assert_eq!(Compass::from_angle(315.), Compass::E);
    /// assert_eq!(Compass::from_angle(-90.), Compass::S);
    /// ```
    pub fn from_angle(angle: f64) -> Self {
        let angle = wrap_angle(angle);
        if angle <= 45. || angle >= 315. {
            Compass::E
        } else if angle <= 135. {
            Compass::N
        } else if angle <= 225. {
            Compass::W
        } else {
            Compass::S
        }
    }

    /// The orientation, in degrees, of a port facing this side.
    pub const fn angle(&self) -> f64 {
        match self {
            Compass::E => 0.,
            Compass::N => 90.,
            Compass::W => 180.,
            Compass::S => 270.,
        }
    }

    /// Returns the opposite side.
    pub const fn opposite(&self) -> Self {
        match self {
            Compass::E => Compass::W,
            Compass::N => Compass::S,
            Compass::W => Compass::E,
            Compass::S => Compass::N,
        }
    }
}

impl Display for Compass {
    /// Displays the side as its single-letter abbreviation.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Compass::E => "E",
            Compass::N => "N",
            Compass::W => "W",
            Compass::S => "S",
        };
        f.write_str(s)
    }
}
