//! Extrusion of cross-sections along paths.

use arcstr::ArcStr;
use cache::mem::NameCache;
use geometry::prelude::*;
use layir::{Component, Port};
use serde::Serialize;

use crate::cross_section::{CrossSection, Param};
use crate::error::{GeometryError, Result, SpecificationError};
use crate::path::Path;
use crate::ports;

/// Name prefix of extruded components.
pub const NAME_PREFIX: &str = "path";

/// Options for [`extrude`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrudeOpts {
    /// Douglas-Peucker tolerance applied to each boundary curve. `Some(0.)` keeps every point.
    pub simplify: Option<f64>,
    /// Grid, in nanometers, that output coordinates are rounded to.
    pub snap_to_grid_nm: Option<u32>,
    /// Assign canonical port names once all strips are extruded.
    pub rename_ports: bool,
}

impl Default for ExtrudeOpts {
    fn default() -> Self {
        Self {
            simplify: None,
            snap_to_grid_nm: None,
            rename_ports: true,
        }
    }
}

impl ExtrudeOpts {
    /// Reads the `[extrude]` section of `config`.
    pub fn from_config(config: &config::Config) -> Self {
        Self {
            simplify: config.extrude.simplify,
            snap_to_grid_nm: config.extrude.snap_to_grid_nm,
            rename_ports: config.extrude.rename_ports,
        }
    }

    pub fn with_simplify(mut self, tolerance: f64) -> Self {
        self.simplify = Some(tolerance);
        self
    }

    pub fn with_snap_to_grid_nm(mut self, grid: u32) -> Self {
        self.snap_to_grid_nm = Some(grid);
        self
    }

    pub fn with_rename_ports(mut self, rename_ports: bool) -> Self {
        self.rename_ports = rename_ports;
        self
    }

    fn validate(&self) -> Result<(), SpecificationError> {
        if let Some(tol) = self.simplify {
            if !(tol.is_finite() && tol >= 0.) {
                return Err(SpecificationError::InvalidTolerance(tol));
            }
        }
        if let Some(grid) = self.snap_to_grid_nm {
            if grid == 0 {
                return Err(SpecificationError::InvalidGrid(grid));
            }
        }
        Ok(())
    }
}

/// The geometry that determines an extruded component's name.
#[derive(Serialize)]
struct ExtrusionKey<'a> {
    points: &'a [Point],
    strips: Vec<StripKey<'a>>,
    simplify: Option<f64>,
    snap_to_grid_nm: Option<u32>,
    rename_ports: bool,
}

#[derive(Serialize)]
struct StripKey<'a> {
    widths: Vec<f64>,
    offsets: Vec<f64>,
    layer: (u16, u16),
    port_labels: &'a (Option<ArcStr>, Option<ArcStr>),
}

/// Samples a strip parameter, keeping a single value for constants.
fn resolve(param: &Param, fractions: &[f64], strip: usize, name: &'static str) -> Result<Vec<f64>> {
    let values = match param {
        Param::Constant(value) => vec![*value],
        Param::Sampled(_) => param.sample(fractions),
    };
    if values.iter().all(|v| v.is_finite()) {
        Ok(values)
    } else {
        Err(SpecificationError::UndefinedStripParam { strip, param: name }.into())
    }
}

/// Broadcasts a resolved parameter to one value per point.
fn per_point(values: &[f64], n: usize) -> Vec<f64> {
    if values.len() == n {
        values.to_vec()
    } else {
        vec![values[0]; n]
    }
}

/// Sweeps each strip of `xs` along `path`, producing one polygon per strip.
///
/// Each strip becomes the region between two curves offset from the path by
/// `offset ± width / 2`. Ports are placed at the ends of strips that request
/// them and, unless disabled, renamed by [`ports::classify_and_name`]. The
/// component is named from a hash of its inputs, so identical inputs always
/// produce identically named components.
///
/// # Example
///
/// ```
/// # use photonics::prelude::*;
/// let path = straight(10., 100).unwrap();
/// let mut xs = CrossSection::new();
/// xs.add(0.5, 0., layers::WG, Some("in"), Some("out"));
/// let c = extrude(&path, &xs, &ExtrudeOpts::default()).unwrap();
/// assert_eq!(c.port("W0").midpoint(), Point::new(0., 0.));
/// assert_eq!(c.port("E0").midpoint(), Point::new(10., 0.));
/// ```
pub fn extrude(path: &Path, xs: &CrossSection, opts: &ExtrudeOpts) -> Result<Component> {
    opts.validate()?;

    let fractions = path.normalized_lengths();
    let n = path.num_points();
    let mut component = Component::new(NAME_PREFIX);
    let mut keys = Vec::with_capacity(xs.len());

    for (i, strip) in xs.strips().iter().enumerate() {
        let widths = resolve(&strip.width, &fractions, i, "width")?;
        let thinnest = widths.iter().copied().fold(f64::INFINITY, f64::min);
        if thinnest <= 0. {
            return Err(SpecificationError::NonPositiveWidth {
                strip: i,
                value: thinnest,
            }
            .into());
        }
        if let (Some(a), Some(b)) = &strip.port_labels {
            if a == b {
                return Err(SpecificationError::DuplicatePortLabel {
                    strip: i,
                    label: a.clone(),
                }
                .into());
            }
        }
        let offsets = resolve(&strip.offset, &fractions, i, "offset")?;

        // A varying offset reshapes the curve, so the width is swept along the shifted copy.
        let shifted;
        let (reference, base) = if strip.offset.is_constant() {
            (path, per_point(&offsets, n))
        } else {
            shifted = path.shifted(&offsets, true);
            (&shifted, vec![0.; n])
        };
        let widths = per_point(&widths, n);

        let boundary = |sign: f64| {
            let distances: Vec<f64> = base
                .iter()
                .zip(&widths)
                .map(|(o, w)| o + sign * w / 2.)
                .collect();
            let curve = polyline::parametric_offset(
                reference.points(),
                &distances,
                reference.start_angle(),
                reference.end_angle(),
            );
            match opts.simplify {
                Some(tol) if tol > 0. => douglas_peucker(&curve, tol),
                _ => curve,
            }
        };
        let outer = boundary(1.);
        let inner = boundary(-1.);

        let mut polygon =
            Polygon::from_verts(outer.iter().chain(inner.iter().rev()).copied().collect());
        if let Some(grid) = opts.snap_to_grid_nm {
            polygon = polygon.snap_to_grid_nm(grid);
        }
        if !polygon.is_finite() {
            return Err(GeometryError::NonFinite { strip: i }.into());
        }
        if polygon.area() == 0. {
            return Err(GeometryError::ZeroArea { strip: i }.into());
        }
        tracing::debug!(
            strip = i,
            layer = %strip.layer,
            vertices = polygon.len(),
            "extruded strip"
        );
        component.add_polygon(strip.layer, polygon);

        let (start, end) = &strip.port_labels;
        if let Some(label) = start {
            component.add_port(Port::from_endpoints(
                format!("{i}_{label}"),
                inner[0],
                outer[0],
                strip.layer,
            ));
        }
        if let Some(label) = end {
            component.add_port(Port::from_endpoints(
                format!("{i}_{label}"),
                outer[outer.len() - 1],
                inner[inner.len() - 1],
                strip.layer,
            ));
        }

        keys.push(StripKey {
            widths,
            offsets,
            layer: (strip.layer.layer(), strip.layer.datatype()),
            port_labels: &strip.port_labels,
        });
    }

    let key = ExtrusionKey {
        points: path.points(),
        strips: keys,
        simplify: opts.simplify,
        snap_to_grid_nm: opts.snap_to_grid_nm,
        rename_ports: opts.rename_ports,
    };
    component.set_name(NameCache::global().get_or_assign(NAME_PREFIX, &key)?);

    if opts.rename_ports {
        ports::classify_and_name(&mut component)?;
    }
    tracing::debug!(
        name = %component.name(),
        strips = xs.len(),
        ports = component.num_ports(),
        "extruded path"
    );
    Ok(component)
}
