//! Layout intermediate representation for photonic components.
//!
//! A [`Component`] owns a list of layered polygons and a map of named [`Port`]s.

pub mod port;


use std::fmt::Display;

use arcstr::ArcStr;
use geometry::prelude::Polygon;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use crate::port::{ParsePortTypeError, Port, PortType};

/// A fabrication mask layer, identified by a `(layer, datatype)` pair.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Layer(pub u16, pub u16);

impl Layer {
    /// Creates a new layer.
    #[inline]
    pub const fn new(layer: u16, datatype: u16) -> Self {
        Self(layer, datatype)
    }

    /// The layer number.
    #[inline]
    pub const fn layer(&self) -> u16 {
        self.0
    }

    /// The datatype.
    #[inline]
    pub const fn datatype(&self) -> u16 {
        self.1
    }
}

/// A bare layer number has datatype 0.
impl From<u16> for Layer {
    fn from(value: u16) -> Self {
        Self(value, 0)
    }
}

impl From<(u16, u16)> for Layer {
    fn from(value: (u16, u16)) -> Self {
        Self(value.0, value.1)
    }
}

impl Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.0, self.1)
    }
}

/// A primitive layout shape consisting of a layer and a polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    layer: Layer,
    polygon: Polygon,
}

impl Shape {
    #[inline]
    pub fn new(layer: impl Into<Layer>, polygon: Polygon) -> Self {
        Self {
            layer: layer.into(),
            polygon,
        }
    }

    #[inline]
    pub fn layer(&self) -> Layer {
        self.layer
    }

    #[inline]
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }
}

/// A named collection of layered polygons and ports.
///
/// Polygons keep the order in which they were added. Ports are keyed by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    name: ArcStr,
    shapes: Vec<Shape>,
    ports: IndexMap<ArcStr, Port>,
}

impl Component {
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            shapes: Default::default(),
            ports: Default::default(),
        }
    }

    /// The name of the component.
    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// Renames the component.
    ///
    /// Ports that referred to the old name as their parent are updated.
    pub fn set_name(&mut self, name: impl Into<ArcStr>) {
        let name = name.into();
        for port in self.ports.values_mut() {
            if port.parent() == Some(&self.name) {
                port.set_parent(name.clone());
            }
        }
        self.name = name;
    }

    /// Adds a polygon on the given layer.
    pub fn add_polygon(&mut self, layer: impl Into<Layer>, polygon: Polygon) {
        self.shapes.push(Shape::new(layer, polygon));
    }

    /// Iterate over the shapes of this component, in insertion order.
    #[inline]
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Iterate over the polygons drawn on `layer`.
    pub fn polygons_on(&self, layer: impl Into<Layer>) -> impl Iterator<Item = &Polygon> {
        let layer = layer.into();
        self.shapes
            .iter()
            .filter(move |shape| shape.layer == layer)
            .map(|shape| &shape.polygon)
    }

    /// Iterate over the ports of this component.
    #[inline]
    pub fn ports(&self) -> impl Iterator<Item = (&ArcStr, &Port)> {
        self.ports.iter()
    }

    /// The port map of this component.
    #[inline]
    pub fn port_map(&self) -> &IndexMap<ArcStr, Port> {
        &self.ports
    }

    /// The number of ports on this component.
    #[inline]
    pub fn num_ports(&self) -> usize {
        self.ports.len()
    }

    /// Adds a port, keyed by its name.
    ///
    /// Returns the port previously stored under the same name, if any.
    pub fn add_port(&mut self, port: Port) -> Option<Port> {
        let replaced = self.ports.insert(port.name().clone(), port);
        if let Some(ref old) = replaced {
            tracing::warn!(component = %self.name, port = %old.name(), "replacing existing port");
        }
        replaced
    }

    /// Get a port of this component by name.
    ///
    /// # Panics
    ///
    /// Panics if the provided port does not exist.
    #[inline]
    pub fn port(&self, name: &str) -> &Port {
        match self.try_port(name) {
            Some(port) => port,
            None => {
                tracing::error!("no port named `{}` on component `{}`", name, self.name);
                panic!("no port named `{}` on component `{}`", name, self.name);
            }
        }
    }

    /// Get a port of this component by name.
    #[inline]
    pub fn try_port(&self, name: &str) -> Option<&Port> {
        self.ports.get(name)
    }

    /// Replaces the entire port map.
    ///
    /// Callers are responsible for keeping every key equal to its port's name.
    pub fn set_ports(&mut self, ports: IndexMap<ArcStr, Port>) {
        debug_assert!(ports.iter().all(|(name, port)| name == port.name()));
        self.ports = ports;
    }
}
