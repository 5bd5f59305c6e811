//! Error types and error handling utilities.

use std::sync::Arc;

use arcstr::ArcStr;
use layir::{ParsePortTypeError, PortType};

/// A result type returning photonics errors.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error type for layout generation.
#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    /// The caller supplied contradictory geometry or configuration.
    #[error("specification error: {0}")]
    Specification(#[from] SpecificationError),
    /// Computed geometry is numerically invalid.
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),
    /// An invariant that should hold by construction was violated.
    #[error("internal error: {0}")]
    Internal(#[from] InternalError),
}

impl Error {
    /// Returns `true` if this is a [`SpecificationError`].
    pub fn is_specification(&self) -> bool {
        matches!(self, Error::Specification(_))
    }

    /// Returns `true` if this is a [`GeometryError`].
    pub fn is_geometry(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Returns `true` if this is an [`InternalError`].
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Internal(_))
    }
}

impl From<ParsePortTypeError> for Error {
    fn from(value: ParsePortTypeError) -> Self {
        Error::Specification(SpecificationError::UnknownPortType(value.0))
    }
}

impl From<cache::error::Error> for Error {
    fn from(value: cache::error::Error) -> Self {
        Error::Internal(InternalError::Cache(Arc::new(value)))
    }
}

/// Invalid caller input.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SpecificationError {
    /// Too few points to define a path.
    #[error("expected at least {required} points, found {found}")]
    TooFewPoints {
        /// Minimum number of points.
        required: usize,
        /// Number of points supplied.
        found: usize,
    },
    /// Point `index` coincides with the point before it.
    #[error("point {index} coincides with the previous point")]
    CoincidentPoints {
        /// Index of the repeated point.
        index: usize,
    },
    /// Point `index` has a non-finite coordinate.
    #[error("point {index} has a non-finite coordinate")]
    NonFinitePoint {
        /// Index of the offending point.
        index: usize,
    },
    /// A numeric parameter is out of range.
    #[error("invalid value {value} for `{name}`")]
    InvalidParam {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The width or offset of strip `strip` did not evaluate to finite numbers.
    #[error("strip {strip} has an undefined {param}")]
    UndefinedStripParam {
        /// Index of the strip in the cross-section.
        strip: usize,
        /// Either `"width"` or `"offset"`.
        param: &'static str,
    },
    /// Strip `strip` has a width sample that is zero or negative.
    #[error("strip {strip} must have a positive width, got {value}")]
    NonPositiveWidth {
        /// Index of the strip in the cross-section.
        strip: usize,
        /// The smallest width sample.
        value: f64,
    },
    /// Both ends of strip `strip` request the same port label.
    #[error("strip {strip} uses the port label `{label}` on both ends")]
    DuplicatePortLabel {
        /// Index of the strip in the cross-section.
        strip: usize,
        /// The repeated label.
        label: ArcStr,
    },
    /// A simplification tolerance was not a non-negative number.
    #[error("simplify tolerance must be a non-negative number, got {0}")]
    InvalidTolerance(f64),
    /// A snapping grid of zero.
    #[error("grid pitch must be positive, got {0} nm")]
    InvalidGrid(u32),
    /// Corners on both ends of a segment do not fit in its length.
    #[error(
        "not enough distance between waypoints {segment} and {}: corners need {required}, segment is {available}; reduce the radius or space the points farther apart",
        segment + 1
    )]
    InsufficientSpacing {
        /// Index of the segment's first waypoint.
        segment: usize,
        /// Sum of the encroachments of the adjacent corners.
        required: f64,
        /// Length of the segment.
        available: f64,
    },
    /// A waypoint turns back on itself.
    #[error("cannot round the {angle} degree turn at waypoint {waypoint}")]
    UnroundableTurn {
        /// Index of the waypoint.
        waypoint: usize,
        /// Signed turn angle in degrees.
        angle: f64,
    },
    /// A corner generator produced an unusable path.
    #[error("corner at waypoint {waypoint} is degenerate")]
    InvalidCorner {
        /// Index of the waypoint.
        waypoint: usize,
    },
    /// A port type string is not recognized.
    #[error("unknown port type `{0}`")]
    UnknownPortType(String),
    /// A port type has no naming convention.
    #[error("port `{port}` on component `{component}` has type `{port_type}`, which cannot be named automatically")]
    UnsupportedPortType {
        /// The component being named.
        component: ArcStr,
        /// The offending port.
        port: ArcStr,
        /// Its type.
        port_type: PortType,
    },
    /// Renaming would give two ports the same name.
    #[error("more than one port would be named `{0}`")]
    NameCollision(ArcStr),
}

/// Numerically invalid output.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Offsetting strip `strip` produced NaN or infinite coordinates.
    #[error("strip {strip} produced non-finite coordinates")]
    NonFinite {
        /// Index of the strip in the cross-section.
        strip: usize,
    },
    /// Strip `strip` produced a polygon with no area.
    #[error("strip {strip} produced a zero-area polygon")]
    ZeroArea {
        /// Index of the strip in the cross-section.
        strip: usize,
    },
}

/// A violated internal invariant. Indicates a bug.
#[derive(thiserror::Error, Debug, Clone)]
pub enum InternalError {
    /// Naming produced the same name twice.
    #[error("duplicate port name `{0}` after naming")]
    DuplicatePortName(ArcStr),
    /// The name cache failed to encode a key.
    #[error("name cache error: {0}")]
    Cache(Arc<cache::error::Error>),
}
