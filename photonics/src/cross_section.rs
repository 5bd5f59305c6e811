//! Layered width and offset profiles swept along a [`Path`](crate::path::Path).

use std::fmt::{self, Debug};
use std::sync::Arc;

use arcstr::ArcStr;
use layir::Layer;

/// A strip parameter that is either constant or a function of position along the path.
///
/// Sampled parameters receive the normalized arc length, from 0 at the start
/// of the path to 1 at its end.
#[derive(Clone)]
pub enum Param {
    /// The same value everywhere.
    Constant(f64),
    /// A value that varies with normalized arc length.
    Sampled(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl Param {
    /// Creates a sampled parameter from a function of normalized arc length.
    pub fn sampled(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self::Sampled(Arc::new(f))
    }

    /// A parameter that varies linearly from `start` to `end`.
    ///
    /// # Example
    ///
    /// ```
    /// # use photonics::cross_section::Param;
    /// let taper = Param::linear(1., 2.);
    /// assert_eq!(taper.sample(&[0., 0.5, 1.]), vec![1., 1.5, 2.]);
    /// ```
    pub fn linear(start: f64, end: f64) -> Self {
        Self::sampled(move |t| start + (end - start) * t)
    }

    #[inline]
    pub fn is_constant(&self) -> bool {
        matches!(self, Param::Constant(_))
    }

    /// The value at normalized arc length `t`.
    pub fn at(&self, t: f64) -> f64 {
        match self {
            Param::Constant(value) => *value,
            Param::Sampled(f) => f(t),
        }
    }

    /// Evaluates the parameter at each fraction.
    pub fn sample(&self, fractions: &[f64]) -> Vec<f64> {
        fractions.iter().map(|&t| self.at(t)).collect()
    }
}

impl Default for Param {
    fn default() -> Self {
        Param::Constant(0.)
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Constant(value)
    }
}

impl Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Param::Sampled(_) => f.write_str("Sampled(..)"),
        }
    }
}

/// One layer of a [`CrossSection`].
#[derive(Debug, Clone)]
pub struct Strip {
    /// Full width of the strip.
    pub width: Param,
    /// Distance of the strip's center from the path, positive to the left.
    pub offset: Param,
    pub layer: Layer,
    /// Labels of the ports created at the start and end of the path.
    pub port_labels: (Option<ArcStr>, Option<ArcStr>),
}

impl Strip {
    /// A centered strip with no ports.
    pub fn new(width: impl Into<Param>, layer: impl Into<Layer>) -> Self {
        Self {
            width: width.into(),
            offset: Param::default(),
            layer: layer.into(),
            port_labels: (None, None),
        }
    }

    pub fn with_offset(mut self, offset: impl Into<Param>) -> Self {
        self.offset = offset.into();
        self
    }

    /// Requests ports at the start and end of the path.
    pub fn with_ports(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        self.port_labels = (start.map(ArcStr::from), end.map(ArcStr::from));
        self
    }

    /// The number of ports this strip produces.
    pub fn num_ports(&self) -> usize {
        usize::from(self.port_labels.0.is_some()) + usize::from(self.port_labels.1.is_some())
    }
}

/// An ordered list of strips. Order sets the polygon draw order and port prefixes.
///
/// # Example
///
/// ```
/// # use photonics::cross_section::{CrossSection, Param};
/// # use photonics::layers;
/// let mut xs = CrossSection::new();
/// xs.add(0.5, 0., layers::WG, Some("in"), Some("out"))
///     .add(Param::linear(1., 2.), 0., layers::SLAB90, None, None);
/// assert_eq!(xs.len(), 2);
/// assert_eq!(xs.num_ports(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrossSection {
    strips: Vec<Strip>,
}

impl CrossSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a strip.
    pub fn add(
        &mut self,
        width: impl Into<Param>,
        offset: impl Into<Param>,
        layer: impl Into<Layer>,
        start_label: Option<&str>,
        end_label: Option<&str>,
    ) -> &mut Self {
        self.strips.push(
            Strip::new(width, layer)
                .with_offset(offset)
                .with_ports(start_label, end_label),
        );
        self
    }

    /// Appends a prebuilt strip.
    pub fn push(&mut self, strip: Strip) -> &mut Self {
        self.strips.push(strip);
        self
    }

    #[inline]
    pub fn strips(&self) -> &[Strip] {
        &self.strips
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strips.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strips.is_empty()
    }

    /// Total number of port labels across all strips.
    pub fn num_ports(&self) -> usize {
        self.strips.iter().map(Strip::num_ports).sum()
    }
}

impl FromIterator<Strip> for CrossSection {
    fn from_iter<T: IntoIterator<Item = Strip>>(iter: T) -> Self {
        Self {
            strips: iter.into_iter().collect(),
        }
    }
}
