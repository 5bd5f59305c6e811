//! Interface to external design rule checkers.
//!
//! Checks are delegated to a [`DrcEngine`], which receives a component or a
//! layout file together with [`CheckParams`] and returns the area, in squared
//! database units, of all violating regions. An area of `0.0` means the check
//! passed.

use std::path::Path;

use layir::{Component, Layer};
use serde::{Deserialize, Serialize};

/// What a check runs on.
#[derive(Debug, Clone, Copy)]
pub enum DrcTarget<'a> {
    /// A component in memory.
    Component(&'a Component),
    /// A layout file on disk. The engine checks its top cell.
    File(&'a Path),
}

impl<'a> From<&'a Component> for DrcTarget<'a> {
    fn from(value: &'a Component) -> Self {
        DrcTarget::Component(value)
    }
}

impl<'a> From<&'a Path> for DrcTarget<'a> {
    fn from(value: &'a Path) -> Self {
        DrcTarget::File(value)
    }
}

/// How distances between edges are measured.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metrics {
    #[default]
    Euclidian,
    Square,
    Projection,
}

/// Parameters of a single check, handed to the engine unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckParams {
    /// The layer being checked.
    pub layer: Layer,
    /// The second layer of separation and enclosing checks.
    pub other_layer: Option<Layer>,
    /// Minimum width, space or distance in microns.
    pub min_distance: f64,
    /// Database units per micron.
    pub dbu: f64,
    /// Edges meeting at this angle or more are not checked.
    pub ignore_angle_deg: f64,
    /// Report whole edges instead of the violating parts.
    pub whole_edges: bool,
    /// `None` leaves the choice to the engine.
    pub metrics: Option<Metrics>,
    pub min_projection: Option<f64>,
    pub max_projection: Option<f64>,
}

impl CheckParams {
    pub const DEFAULT_DBU: f64 = 1e3;
    pub const DEFAULT_IGNORE_ANGLE_DEG: f64 = 80.;

    pub fn new(layer: impl Into<Layer>, min_distance: f64) -> Self {
        Self {
            layer: layer.into(),
            other_layer: None,
            min_distance,
            dbu: Self::DEFAULT_DBU,
            ignore_angle_deg: Self::DEFAULT_IGNORE_ANGLE_DEG,
            whole_edges: false,
            metrics: None,
            min_projection: None,
            max_projection: None,
        }
    }

    pub fn with_other_layer(mut self, layer: impl Into<Layer>) -> Self {
        self.other_layer = Some(layer.into());
        self
    }

    pub fn with_dbu(mut self, dbu: f64) -> Self {
        self.dbu = dbu;
        self
    }

    pub fn with_ignore_angle_deg(mut self, angle: f64) -> Self {
        self.ignore_angle_deg = angle;
        self
    }

    pub fn with_whole_edges(mut self, whole_edges: bool) -> Self {
        self.whole_edges = whole_edges;
        self
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_projection(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_projection = min;
        self.max_projection = max;
        self
    }

    /// The minimum distance in database units.
    #[inline]
    pub fn min_distance_dbu(&self) -> f64 {
        self.min_distance * self.dbu
    }
}

/// A geometry engine able to run design rule checks.
///
/// Every check returns the violating area in squared database units.
pub trait DrcEngine {
    /// The error type returned by the engine.
    type Error;

    /// Regions of `params.layer` narrower than the minimum width.
    fn width_check(&self, target: DrcTarget<'_>, params: &CheckParams) -> Result<f64, Self::Error>;

    /// Gaps between shapes of `params.layer` smaller than the minimum space.
    fn space_check(&self, target: DrcTarget<'_>, params: &CheckParams) -> Result<f64, Self::Error>;

    /// Places where `params.layer` comes closer than the minimum distance to
    /// `params.other_layer`.
    fn separation_check(
        &self,
        target: DrcTarget<'_>,
        params: &CheckParams,
    ) -> Result<f64, Self::Error>;

    /// Places where `params.layer` encloses `params.other_layer` by less than
    /// the minimum distance.
    fn enclosing_check(
        &self,
        target: DrcTarget<'_>,
        params: &CheckParams,
    ) -> Result<f64, Self::Error>;
}

/// Runs a minimum width check with default parameters.
pub fn check_width<'a, E: DrcEngine + ?Sized>(
    engine: &E,
    target: impl Into<DrcTarget<'a>>,
    layer: impl Into<Layer>,
    min_width: f64,
) -> Result<f64, E::Error> {
    let params = CheckParams::new(layer, min_width);
    tracing::debug!(layer = %params.layer, min_width, "running width check");
    engine.width_check(target.into(), &params)
}

/// Runs a minimum space check with default parameters.
pub fn check_space<'a, E: DrcEngine + ?Sized>(
    engine: &E,
    target: impl Into<DrcTarget<'a>>,
    layer: impl Into<Layer>,
    min_space: f64,
) -> Result<f64, E::Error> {
    let params = CheckParams::new(layer, min_space);
    tracing::debug!(layer = %params.layer, min_space, "running space check");
    engine.space_check(target.into(), &params)
}

/// Checks that `layer1` and `layer2` stay at least `min_space` apart.
pub fn check_exclusion<'a, E: DrcEngine + ?Sized>(
    engine: &E,
    target: impl Into<DrcTarget<'a>>,
    layer1: impl Into<Layer>,
    layer2: impl Into<Layer>,
    min_space: f64,
) -> Result<f64, E::Error> {
    let params = CheckParams::new(layer1, min_space).with_other_layer(layer2);
    tracing::debug!(layer = %params.layer, min_space, "running exclusion check");
    engine.separation_check(target.into(), &params)
}

/// Checks that `outer` encloses `inner` by at least `min_inclusion`.
pub fn check_inclusion<'a, E: DrcEngine + ?Sized>(
    engine: &E,
    target: impl Into<DrcTarget<'a>>,
    outer: impl Into<Layer>,
    inner: impl Into<Layer>,
    min_inclusion: f64,
) -> Result<f64, E::Error> {
    let params = CheckParams::new(outer, min_inclusion).with_other_layer(inner);
    tracing::debug!(layer = %params.layer, min_inclusion, "running inclusion check");
    engine.enclosing_check(target.into(), &params)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use test_log::test;

    use super::*;
    use crate::components::rectangle;
    use crate::layers;

    /// Flags every shape whose bounding box is narrower than the minimum width.
    #[derive(Default)]
    struct BboxEngine {
        calls: RefCell<Vec<(&'static str, CheckParams)>>,
    }

    #[derive(Debug, PartialEq)]
    struct Unsupported;

    impl BboxEngine {
        fn record(&self, check: &'static str, params: &CheckParams) {
            self.calls.borrow_mut().push((check, params.clone()));
        }
    }

    impl DrcEngine for BboxEngine {
        type Error = Unsupported;

        fn width_check(&self, target: DrcTarget<'_>, params: &CheckParams) -> Result<f64, Unsupported> {
            self.record("width", params);
            let DrcTarget::Component(component) = target else {
                return Err(Unsupported);
            };
            let min = params.min_distance_dbu();
            Ok(component
                .polygons_on(params.layer)
                .filter_map(|p| p.bbox())
                .map(|(lo, hi)| ((hi.x - lo.x) * params.dbu, (hi.y - lo.y) * params.dbu))
                .filter(|&(w, h)| w < min || h < min)
                .map(|(w, h)| w * h)
                .sum())
        }

        fn space_check(&self, _: DrcTarget<'_>, params: &CheckParams) -> Result<f64, Unsupported> {
            self.record("space", params);
            Ok(0.)
        }

        fn separation_check(&self, _: DrcTarget<'_>, params: &CheckParams) -> Result<f64, Unsupported> {
            self.record("separation", params);
            Ok(0.)
        }

        fn enclosing_check(&self, _: DrcTarget<'_>, params: &CheckParams) -> Result<f64, Unsupported> {
            self.record("enclosing", params);
            Ok(1.5)
        }
    }

    #[test]
    fn width_violations_are_reported_as_area() {
        let engine = BboxEngine::default();
        let c = rectangle((50., 50.), layers::WG, false, &[]).unwrap();
        assert_eq!(check_width(&engine, &c, layers::WG, 60.), Ok(50e3 * 50e3));
        assert_eq!(check_width(&engine, &c, layers::WG, 40.), Ok(0.));
        assert_eq!(check_width(&engine, &c, layers::M1, 60.), Ok(0.));
    }

    #[test]
    fn convenience_checks_fill_defaults() {
        let engine = BboxEngine::default();
        let c = rectangle((1., 1.), layers::WG, true, &[]).unwrap();
        check_space(&engine, &c, layers::WG, 0.15).unwrap();
        check_exclusion(&engine, &c, layers::WG, layers::SLAB90, 0.2).unwrap();
        assert_eq!(check_inclusion(&engine, &c, layers::WGCLAD, layers::WG, 0.1), Ok(1.5));

        let calls = engine.calls.borrow();
        let names: Vec<_> = calls.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["space", "separation", "enclosing"]);
        for (_, params) in calls.iter() {
            assert_eq!(params.dbu, CheckParams::DEFAULT_DBU);
            assert_eq!(params.ignore_angle_deg, 80.);
            assert!(!params.whole_edges);
            assert_eq!(params.metrics, None);
            assert_eq!(params.min_projection, None);
            assert_eq!(params.max_projection, None);
        }
        assert_eq!(calls[0].1.other_layer, None);
        assert_eq!(calls[1].1.other_layer, Some(layers::SLAB90));
        assert_eq!(calls[2].1.layer, layers::WGCLAD);
        assert_eq!(calls[2].1.other_layer, Some(layers::WG));
    }

    #[test]
    fn engine_errors_propagate() {
        let engine = BboxEngine::default();
        let path = Path::new("top.gds");
        assert_eq!(check_width(&engine, path, layers::WG, 0.1), Err(Unsupported));
    }

    #[test]
    fn params_builders() {
        let params = CheckParams::new(layers::WG, 0.15)
            .with_dbu(1e4)
            .with_ignore_angle_deg(90.)
            .with_whole_edges(true)
            .with_metrics(Metrics::Projection)
            .with_projection(Some(0.1), None);
        assert_eq!(params.min_distance_dbu(), 1500.);
        assert_eq!(params.metrics, Some(Metrics::Projection));
        assert_eq!(params.min_projection, Some(0.1));
        assert!(params.whole_edges);
    }
}
