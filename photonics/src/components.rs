//! Elementary components.

use cache::mem::NameCache;
use geometry::prelude::*;
use layir::{Component, Layer, Port, PortType};
use serde::Serialize;

use crate::error::{Result, SpecificationError};
use crate::ports;

fn positive(name: &'static str, value: f64) -> Result<f64, SpecificationError> {
    if value.is_finite() && value > 0. {
        Ok(value)
    } else {
        Err(SpecificationError::InvalidParam { name, value })
    }
}

/// A port requested on one side of a [`rectangle`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RectPort {
    /// The side the port sits on and faces.
    pub side: Compass,
    /// Position along the side, measured from the rectangle's lower-left corner.
    pub position: f64,
    pub width: f64,
    pub port_type: PortType,
}

impl RectPort {
    /// An optical port.
    pub fn new(side: Compass, position: f64, width: f64) -> Self {
        Self {
            side,
            position,
            width,
            port_type: PortType::Optical,
        }
    }

    pub fn with_port_type(mut self, port_type: PortType) -> Self {
        self.port_type = port_type;
        self
    }
}

#[derive(Serialize)]
struct RectangleKey<'a> {
    size: (f64, f64),
    layer: Layer,
    centered: bool,
    ports: &'a [RectPort],
}

/// A `size.0` by `size.1` rectangle on `layer`.
///
/// The lower-left corner sits at the origin, or the rectangle is centered on
/// it if `centered` is set. Requested ports are placed on their sides and
/// then named by [`ports::classify_and_name`].
///
/// # Example
///
/// ```
/// # use photonics::prelude::*;
/// # use photonics::components::{rectangle, RectPort};
/// let pad = rectangle(
///     (4., 2.),
///     layers::M1,
///     false,
///     &[RectPort::new(Compass::W, 1., 2.).with_port_type(PortType::Dc)],
/// )
/// .unwrap();
/// assert_eq!(pad.port("E_0").midpoint(), Point::new(0., 1.));
/// ```
pub fn rectangle(
    size: (f64, f64),
    layer: impl Into<Layer>,
    centered: bool,
    ports: &[RectPort],
) -> Result<Component> {
    let layer = layer.into();
    let w = positive("width", size.0)?;
    let h = positive("height", size.1)?;
    let origin = if centered {
        Point::new(-w / 2., -h / 2.)
    } else {
        Point::zero()
    };

    let mut component = Component::new("rectangle");
    let corners = [(w, h), (w, 0.), (0., 0.), (0., h)];
    component.add_polygon(
        layer,
        Polygon::from_verts(corners.into_iter().map(|c| origin + Point::from(c)).collect()),
    );

    for (i, spec) in ports.iter().enumerate() {
        if !spec.position.is_finite() {
            return Err(SpecificationError::InvalidParam {
                name: "position",
                value: spec.position,
            }
            .into());
        }
        let width = positive("port width", spec.width)?;
        let offset = match spec.side {
            Compass::E => Point::new(w, spec.position),
            Compass::N => Point::new(spec.position, h),
            Compass::W => Point::new(0., spec.position),
            Compass::S => Point::new(spec.position, 0.),
        };
        component.add_port(
            Port::new(i.to_string(), origin + offset, spec.side.angle(), width, layer)
                .with_port_type(spec.port_type),
        );
    }

    let key = RectangleKey {
        size,
        layer,
        centered,
        ports,
    };
    component.set_name(NameCache::global().get_or_assign("rectangle", &key)?);
    crate::ports::classify_and_name(&mut component)?;
    Ok(component)
}

#[derive(Serialize)]
struct WaveguideKey<'a> {
    length: f64,
    width: f64,
    layer: Layer,
    cladding_layers: &'a [Layer],
    cladding_offset: f64,
}

/// A straight waveguide along the x axis with ports `W0` and `E0`.
///
/// Each cladding layer gets a rectangle wider than the core by
/// `cladding_offset` on both sides.
pub fn waveguide(
    length: f64,
    width: f64,
    layer: impl Into<Layer>,
    cladding_layers: &[Layer],
    cladding_offset: f64,
) -> Result<Component> {
    let layer = layer.into();
    let length = positive("length", length)?;
    let width = positive("width", width)?;
    if !(cladding_offset.is_finite() && cladding_offset >= 0.) {
        return Err(SpecificationError::InvalidParam {
            name: "cladding_offset",
            value: cladding_offset,
        }
        .into());
    }

    let band = |half: f64| {
        Polygon::from_verts(vec![
            Point::new(0., -half),
            Point::new(length, -half),
            Point::new(length, half),
            Point::new(0., half),
        ])
    };

    let mut component = Component::new("waveguide");
    component.add_polygon(layer, band(width / 2.));
    for &cladding in cladding_layers {
        component.add_polygon(cladding, band(width / 2. + cladding_offset));
    }
    component.add_port(Port::new("W0", (0., 0.), 180., width, layer));
    component.add_port(Port::new("E0", (length, 0.), 0., width, layer));

    let key = WaveguideKey {
        length,
        width,
        layer,
        cladding_layers,
        cladding_offset,
    };
    component.set_name(NameCache::global().get_or_assign("waveguide", &key)?);
    ports::classify_and_name(&mut component)?;
    tracing::debug!(name = %component.name(), length, width, "built waveguide");
    Ok(component)
}
