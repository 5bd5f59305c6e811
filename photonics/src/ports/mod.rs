//! Port selection and canonical port naming.
//!
//! Optical ports are named per side (`E0`, `N0`, `W0`, `S0`, ...). Heater, DC and
//! superconducting ports are numbered in one counterclockwise ring starting on
//! the east side, with the prefixes `H_`, `E_` and `SC_`.

use std::cmp::Ordering;

use arcstr::ArcStr;
use geometry::prelude::*;
use indexmap::IndexMap;
use layir::{Component, Layer, Port, PortType};

use crate::error::{InternalError, Result, SpecificationError};


/// How a group of ports is named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Scheme {
    /// `{side}{index}`, indexed per side.
    BySide,
    /// `{prefix}{index}`, indexed around the ring.
    Ring(&'static str),
}

impl Scheme {
    fn for_type(port_type: PortType) -> Option<Self> {
        match port_type {
            PortType::Optical => Some(Scheme::BySide),
            PortType::Heater => Some(Scheme::Ring("H_")),
            PortType::Dc => Some(Scheme::Ring("E_")),
            PortType::Superconducting => Some(Scheme::Ring("SC_")),
            PortType::Rf | PortType::Detector | PortType::Electrical => None,
        }
    }
}

// `-0.0` and `0.0` must compare equal.
#[inline]
fn coord(v: f64) -> f64 {
    v + 0.
}

fn by(a: f64, b: f64) -> Ordering {
    coord(a).total_cmp(&coord(b))
}

/// Buckets port indices by the compass side they face, in `Compass::ALL` order.
fn bucket<'a>(ports: &[&Port], indices: impl IntoIterator<Item = &'a usize>) -> [Vec<usize>; 4] {
    let mut sides: [Vec<usize>; 4] = Default::default();
    for &i in indices {
        let side = ports[i].side();
        sides[side as usize].push(i);
    }
    sides
}

/// Names each side's ports `{prefix}{side}{index}`.
///
/// East and west ports are ordered by y, then x. North and south ports are
/// ordered by x, then y.
fn name_by_side(ports: &[&Port], sides: [Vec<usize>; 4], prefix: &str, names: &mut [Option<ArcStr>]) {
    for (side, mut indices) in Compass::ALL.into_iter().zip(sides) {
        match side {
            Compass::E | Compass::W => indices.sort_by(|&a, &b| {
                by(ports[a].y(), ports[b].y()).then_with(|| by(ports[a].x(), ports[b].x()))
            }),
            Compass::N | Compass::S => indices.sort_by(|&a, &b| {
                by(ports[a].x(), ports[b].x()).then_with(|| by(ports[a].y(), ports[b].y()))
            }),
        }
        for (n, i) in indices.into_iter().enumerate() {
            names[i] = Some(arcstr::format!("{prefix}{side}{n}"));
        }
    }
}

/// Names ports `{prefix}{index}` around a counterclockwise ring.
///
/// The ring runs up the east side, right to left along the north side, down
/// the west side and left to right along the south side.
fn name_ring(ports: &[&Port], sides: [Vec<usize>; 4], prefix: &str, names: &mut [Option<ArcStr>]) {
    let [mut east, mut north, mut west, mut south] = sides;
    east.sort_by(|&a, &b| by(ports[a].y(), ports[b].y()));
    north.sort_by(|&a, &b| by(ports[b].x(), ports[a].x()));
    west.sort_by(|&a, &b| by(ports[b].y(), ports[a].y()));
    south.sort_by(|&a, &b| by(ports[a].x(), ports[b].x()));
    for (n, i) in east
        .into_iter()
        .chain(north)
        .chain(west)
        .chain(south)
        .enumerate()
    {
        names[i] = Some(arcstr::format!("{prefix}{n}"));
    }
}

/// Rebuilds the port map of `component` in its original order, renaming ports
/// that received a new name.
fn apply_names(
    component: &mut Component,
    names: Vec<Option<ArcStr>>,
    on_collision: impl Fn(ArcStr) -> crate::error::Error,
) -> Result<()> {
    let parent = component.name().clone();
    let mut renamed = IndexMap::with_capacity(names.len());
    for (port, name) in component.port_map().values().zip(names) {
        let mut port = port.clone();
        if let Some(name) = name {
            tracing::trace!(component = %parent, from = %port.name(), to = %name, "renaming port");
            port.set_name(name);
            port.set_parent(parent.clone());
        }
        let key = port.name().clone();
        if renamed.insert(key.clone(), port).is_some() {
            return Err(on_collision(key));
        }
    }
    component.set_ports(renamed);
    Ok(())
}

/// Assigns canonical names to every port of `component`.
///
/// Ports are grouped by type and each group is named by its convention. The
/// port map is rebuilt with the new names as keys, in its original order, and
/// every port records `component` as its parent.
///
/// Fails without modifying the component if a port's type has no naming
/// convention (RF, detector or generic electrical ports).
///
/// # Example
///
/// ```
/// # use photonics::prelude::*;
/// let mut c = Component::new("ring");
/// c.add_port(Port::new("a", (0., 0.), 0., 1., layers::WG));
/// c.add_port(Port::new("b", (0., 0.), 180., 1., layers::WG));
/// c.add_port(Port::new("c", (1., 0.), 90., 1., layers::HEATER).with_port_type(PortType::Heater));
/// let ports = ports::classify_and_name(&mut c).unwrap();
/// let names: Vec<String> = ports.keys().map(|k| k.to_string()).collect();
/// assert_eq!(names, ["E0", "W0", "H_0"]);
/// ```
pub fn classify_and_name(component: &mut Component) -> Result<&IndexMap<ArcStr, Port>> {
    let ports: Vec<&Port> = component.port_map().values().collect();

    let mut groups: IndexMap<Scheme, Vec<usize>> = IndexMap::new();
    for (i, port) in ports.iter().enumerate() {
        let scheme = Scheme::for_type(port.port_type()).ok_or_else(|| {
            SpecificationError::UnsupportedPortType {
                component: component.name().clone(),
                port: port.name().clone(),
                port_type: port.port_type(),
            }
        })?;
        groups.entry(scheme).or_default().push(i);
    }

    let mut names = vec![None; ports.len()];
    for (scheme, indices) in &groups {
        let sides = bucket(&ports, indices);
        match scheme {
            Scheme::BySide => name_by_side(&ports, sides, "", &mut names),
            Scheme::Ring(prefix) => name_ring(&ports, sides, prefix, &mut names),
        }
    }

    apply_names(component, names, |name| InternalError::DuplicatePortName(name).into())?;
    Ok(component.port_map())
}

/// Names the ports of `component` by the side they face, prefixed by `prefix`,
/// regardless of port type.
///
/// Ports on `layers_excluded` keep their names. Fails without modifying the
/// component if a new name collides with a kept one.
pub fn rename_ports_by_orientation<'a>(
    component: &'a mut Component,
    layers_excluded: &[Layer],
    prefix: &str,
) -> Result<&'a IndexMap<ArcStr, Port>> {
    let ports: Vec<&Port> = component.port_map().values().collect();
    let included: Vec<usize> = (0..ports.len())
        .filter(|&i| !layers_excluded.contains(&ports[i].layer()))
        .collect();

    let mut names = vec![None; ports.len()];
    let sides = bucket(&ports, &included);
    name_by_side(&ports, sides, prefix, &mut names);

    apply_names(component, names, |name| SpecificationError::NameCollision(name).into())?;
    Ok(component.port_map())
}

/// Ports of the given type, keyed by name.
pub fn select_ports(ports: &IndexMap<ArcStr, Port>, port_type: PortType) -> IndexMap<ArcStr, Port> {
    select_types(ports, &[port_type])
}

fn select_types(ports: &IndexMap<ArcStr, Port>, types: &[PortType]) -> IndexMap<ArcStr, Port> {
    ports
        .iter()
        .filter(|(_, p)| types.contains(&p.port_type()))
        .map(|(name, p)| (name.clone(), p.clone()))
        .collect()
}

pub fn select_optical_ports(ports: &IndexMap<ArcStr, Port>) -> IndexMap<ArcStr, Port> {
    select_ports(ports, PortType::Optical)
}

pub fn select_heater_ports(ports: &IndexMap<ArcStr, Port>) -> IndexMap<ArcStr, Port> {
    select_ports(ports, PortType::Heater)
}

pub fn select_dc_ports(ports: &IndexMap<ArcStr, Port>) -> IndexMap<ArcStr, Port> {
    select_ports(ports, PortType::Dc)
}

pub fn select_rf_ports(ports: &IndexMap<ArcStr, Port>) -> IndexMap<ArcStr, Port> {
    select_ports(ports, PortType::Rf)
}

/// DC and generic electrical ports.
pub fn select_electrical_ports(ports: &IndexMap<ArcStr, Port>) -> IndexMap<ArcStr, Port> {
    select_types(ports, &[PortType::Dc, PortType::Electrical])
}

/// Superconducting and detector ports.
pub fn select_superconducting_ports(ports: &IndexMap<ArcStr, Port>) -> IndexMap<ArcStr, Port> {
    select_types(ports, &[PortType::Superconducting, PortType::Detector])
}

/// Ports that face `side`.
pub fn ports_facing<'a>(ports: impl IntoIterator<Item = &'a Port>, side: Compass) -> Vec<&'a Port> {
    ports.into_iter().filter(|p| p.side() == side).collect()
}

/// Ports that are not optical.
pub fn non_optical_ports<'a>(ports: impl IntoIterator<Item = &'a Port>) -> Vec<&'a Port> {
    ports
        .into_iter()
        .filter(|p| p.port_type() != PortType::Optical)
        .collect()
}
