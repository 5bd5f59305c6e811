//! Component ports.

use std::fmt::Display;
use std::str::FromStr;

use arcstr::ArcStr;
use geometry::prelude::*;
use serde::{Deserialize, Serialize};

use crate::Layer;

/// The circuit role of a port.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortType {
    /// A waveguide port.
    #[default]
    Optical,
    /// A heater contact.
    Heater,
    /// A DC electrical contact.
    Dc,
    /// An RF electrical contact.
    Rf,
    /// A superconducting wire terminal.
    Superconducting,
    /// A detector terminal.
    Detector,
    /// A generic electrical contact.
    Electrical,
}

impl PortType {
    /// All port types.
    pub const ALL: [PortType; 7] = [
        PortType::Optical,
        PortType::Heater,
        PortType::Dc,
        PortType::Rf,
        PortType::Superconducting,
        PortType::Detector,
        PortType::Electrical,
    ];

    /// The lowercase name of this port type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PortType::Optical => "optical",
            PortType::Heater => "heater",
            PortType::Dc => "dc",
            PortType::Rf => "rf",
            PortType::Superconducting => "superconducting",
            PortType::Detector => "detector",
            PortType::Electrical => "electrical",
        }
    }
}

impl Display for PortType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Indicates that a string did not name a known [`PortType`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown port type `{0}`")]
pub struct ParsePortTypeError(pub String);

impl FromStr for PortType {
    type Err = ParsePortTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PortType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParsePortTypeError(s.to_string()))
    }
}

/// A named, oriented, width-bearing connection point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    name: ArcStr,
    midpoint: Point,
    /// Orientation in degrees, in `[0, 360)`.
    orientation: f64,
    width: f64,
    layer: Layer,
    port_type: PortType,
    /// The name of the owning component. Used for traceability only.
    parent: Option<ArcStr>,
}

impl Port {
    /// Creates a new optical port. The orientation is wrapped to `[0, 360)`.
    pub fn new(
        name: impl Into<ArcStr>,
        midpoint: impl Into<Point>,
        orientation: f64,
        width: f64,
        layer: impl Into<Layer>,
    ) -> Self {
        Self {
            name: name.into(),
            midpoint: midpoint.into(),
            orientation: wrap_angle(orientation),
            width,
            layer: layer.into(),
            port_type: PortType::default(),
            parent: None,
        }
    }

    /// Creates a port spanning the segment from `p1` to `p2`.
    ///
    /// The midpoint and width come from the segment. The port faces the direction
    /// obtained by turning the vector from `p1` to `p2` counterclockwise by 90 degrees.
    ///
    /// # Example
    ///
    /// ```
    /// # use layir::Port;
    /// # use geometry::prelude::*;
    /// let port = Port::from_endpoints("o1", Point::new(0., -0.25), Point::new(0., 0.25), (1u16, 0u16));
    /// assert_eq!(port.midpoint(), Point::new(0., 0.));
    /// assert_eq!(port.width(), 0.5);
    /// assert_eq!(port.orientation(), 180.);
    /// ```
    pub fn from_endpoints(
        name: impl Into<ArcStr>,
        p1: Point,
        p2: Point,
        layer: impl Into<Layer>,
    ) -> Self {
        let d = p2 - p1;
        let orientation = d.x.atan2(-d.y).to_degrees();
        Self::new(name, p1.midpoint(p2), orientation, d.norm(), layer)
    }

    /// Sets the port type.
    pub fn with_port_type(mut self, port_type: PortType) -> Self {
        self.port_type = port_type;
        self
    }

    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        self.midpoint
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.midpoint.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.midpoint.y
    }

    #[inline]
    pub fn orientation(&self) -> f64 {
        self.orientation
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn layer(&self) -> Layer {
        self.layer
    }

    #[inline]
    pub fn port_type(&self) -> PortType {
        self.port_type
    }

    /// The name of the component this port was last assigned to.
    #[inline]
    pub fn parent(&self) -> Option<&ArcStr> {
        self.parent.as_ref()
    }

    /// The compass side this port faces.
    #[inline]
    pub fn side(&self) -> Compass {
        Compass::from_angle(self.orientation)
    }

    /// The two edge points of the port, in the order accepted by [`Port::from_endpoints`].
    pub fn endpoints(&self) -> (Point, Point) {
        let half = Point::from_angle(self.orientation + 90.) * (self.width / 2.);
        (self.midpoint + half, self.midpoint - half)
    }

    pub fn set_name(&mut self, name: impl Into<ArcStr>) {
        self.name = name.into();
    }

    pub fn set_parent(&mut self, parent: impl Into<ArcStr>) {
        self.parent = Some(parent.into());
    }

    /// Returns a copy of this port facing the opposite direction.
    pub fn flipped(&self) -> Self {
        let mut port = self.clone();
        port.orientation = wrap_angle(self.orientation + 180.);
        port
    }

    /// Returns a copy of this port moved by `(dx, dy)`.
    pub fn moved(&self, dx: f64, dy: f64) -> Self {
        let mut port = self.clone();
        port.translate_mut(Point::new(dx, dy));
        port
    }
}

impl TranslateMut for Port {
    fn translate_mut(&mut self, p: Point) {
        self.midpoint.translate_mut(p);
    }
}
