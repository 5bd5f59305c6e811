//! The standard photonic layer map.

use layir::Layer;

/// Waveguide core.
pub const WG: Layer = Layer(1, 0);
/// Waveguide cladding.
pub const WGCLAD: Layer = Layer(111, 0);
/// 150 nm partial etch.
pub const SLAB150: Layer = Layer(2, 0);
/// 90 nm partial etch.
pub const SLAB90: Layer = Layer(3, 0);
pub const DEEPTRENCH: Layer = Layer(7, 0);
/// Silicon nitride.
pub const WGN: Layer = Layer(34, 0);
pub const HEATER: Layer = Layer(47, 0);
pub const M1: Layer = Layer(41, 0);
pub const M2: Layer = Layer(45, 0);
pub const M3: Layer = Layer(49, 0);
pub const VIA1: Layer = Layer(40, 0);
pub const VIA2: Layer = Layer(44, 0);
pub const VIA3: Layer = Layer(43, 0);
pub const PADDING: Layer = Layer(67, 0);
pub const TEXT: Layer = Layer(66, 0);
/// Port markers.
pub const PORT: Layer = Layer(60, 0);

/// Looks up a named layer in `config`.
pub fn from_config(config: &config::Config, name: &str) -> Option<Layer> {
    config.layer(name).map(|spec| Layer(spec.0, spec.1))
}
