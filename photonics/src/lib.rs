//! Layout generation for photonic integrated circuits.
//!
//! Centerlines are built as [`Path`](path::Path)s, either from primitives
//! ([`straight`](path::straight), [`arc`](path::arc), [`euler`](path::euler))
//! or by rounding the corners of a list of waypoints with
//! [`smooth`](path::smooth). A [`CrossSection`](cross_section::CrossSection)
//! describes the layered strips that [`extrude`](extrude::extrude) sweeps along
//! a path to produce a named [`Component`](layir::Component) with polygons and
//! canonically named ports.
//!
//! # Example
//!
//! ```
//! use photonics::prelude::*;
//!
//! let path = smooth([(0., 0.), (20., 0.), (20., 20.)], 5., &smooth::Arc::default()).unwrap();
//! let mut xs = CrossSection::new();
//! xs.add(0.5, 0., layers::WG, Some("in"), Some("out"));
//! xs.add(3.5, 0., layers::WGCLAD, None, None);
//!
//! let c = extrude(&path, &xs, &ExtrudeOpts::default()).unwrap();
//! assert_eq!(c.port("W0").orientation(), 180.);
//! assert_eq!(c.port("N0").orientation(), 90.);
//! ```

pub mod components;
pub mod cross_section;
pub mod drc;
pub mod error;
pub mod extrude;
pub mod layers;
pub mod path;
pub mod ports;
#[cfg(test)]
mod tests;

pub use error::{Error, Result};

/// Commonly used items.
pub mod prelude {
    pub use geometry::prelude::*;
    pub use layir::{Component, Layer, Port, PortType};

    pub use crate::cross_section::{CrossSection, Param, Strip};
    pub use crate::extrude::{extrude, ExtrudeOpts};
    pub use crate::path::{arc, euler, smooth, straight, CornerGenerator, Path};
    pub use crate::{layers, ports};
}
