//! Settings for photonic layout generation.
//!
//! Settings are read from a TOML document and may then be overridden by
//! `PHOTONICS_<SECTION>_<KEY>` environment variables. Every field has a default,
//! so an empty document yields [`Config::default`].
#![warn(missing_docs)]

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

pub mod env;
pub mod key;

pub use env::Env;
pub use key::ConfigKey;

/// A `(layer, datatype)` pair as written in the `[layers]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerSpec(pub u16, pub u16);

impl fmt::Display for LayerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, self.1)
    }
}

impl FromStr for LayerSpec {
    type Err = anyhow::Error;

    /// Parses `"layer/datatype"`, or a bare `"layer"` with datatype 0.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.trim().splitn(2, '/');
        let layer = parts
            .next()
            .ok_or_else(|| anyhow!("empty layer specification"))?
            .trim()
            .parse()
            .with_context(|| format!("invalid layer number in `{s}`"))?;
        let datatype = match parts.next() {
            Some(dt) => dt
                .trim()
                .parse()
                .with_context(|| format!("invalid datatype in `{s}`"))?,
            None => 0,
        };
        Ok(Self(layer, datatype))
    }
}

/// Sampling density of path primitives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathConfig {
    /// Points per full 360 degree turn for arcs and Euler bends.
    pub npoints: usize,
    /// Points used for straight sections.
    pub straight_npoints: usize,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            npoints: 720,
            straight_npoints: 100,
        }
    }
}

/// Defaults for corner smoothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmoothConfig {
    /// Bend radius in microns.
    pub radius: f64,
}

impl Default for SmoothConfig {
    fn default() -> Self {
        Self { radius: 4.0 }
    }
}

/// Defaults for extrusion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtrudeConfig {
    /// Douglas-Peucker tolerance applied to each polygon edge.
    pub simplify: Option<f64>,
    /// Grid, in nanometers, that polygon vertices are snapped to.
    pub snap_to_grid_nm: Option<u32>,
    /// Whether generated ports are renamed by orientation.
    pub rename_ports: bool,
}

impl Default for ExtrudeConfig {
    fn default() -> Self {
        Self {
            simplify: None,
            snap_to_grid_nm: None,
            rename_ports: true,
        }
    }
}

/// All layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path sampling.
    pub path: PathConfig,
    /// Corner smoothing.
    pub smooth: SmoothConfig,
    /// Extrusion.
    pub extrude: ExtrudeConfig,
    /// Named layers.
    pub layers: BTreeMap<String, LayerSpec>,
}

impl Default for Config {
    fn default() -> Self {
        let layers = [
            ("WG", LayerSpec(1, 0)),
            ("WGCLAD", LayerSpec(111, 0)),
            ("SLAB150", LayerSpec(2, 0)),
            ("SLAB90", LayerSpec(3, 0)),
            ("DEEPTRENCH", LayerSpec(7, 0)),
            ("WGN", LayerSpec(34, 0)),
            ("HEATER", LayerSpec(47, 0)),
            ("M1", LayerSpec(41, 0)),
            ("M2", LayerSpec(45, 0)),
            ("M3", LayerSpec(49, 0)),
            ("VIA1", LayerSpec(40, 0)),
            ("VIA2", LayerSpec(44, 0)),
            ("VIA3", LayerSpec(43, 0)),
            ("PADDING", LayerSpec(67, 0)),
            ("TEXT", LayerSpec(66, 0)),
            ("PORT", LayerSpec(60, 0)),
        ]
        .into_iter()
        .map(|(name, spec)| (name.to_string(), spec))
        .collect();
        Self {
            path: PathConfig::default(),
            smooth: SmoothConfig::default(),
            extrude: ExtrudeConfig::default(),
            layers,
        }
    }
}

impl Config {
    /// Parses a TOML document.
    ///
    /// Layers listed in the document are merged over the default layer table.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let parsed: Config = toml::from_str(toml).context("could not parse input as TOML")?;
        let mut layers = Config::default().layers;
        layers.extend(parsed.layers);
        let cfg = Config { layers, ..parsed };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads and parses the TOML file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let cfg = Self::from_toml_str(&contents)
            .with_context(|| format!("failed to load config from `{}`", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Applies overrides from the process environment.
    pub fn with_os_env(self) -> Result<Self> {
        self.with_env_overrides(&Env::new())
    }

    /// Applies `PHOTONICS_<SECTION>_<KEY>` overrides from `env`.
    ///
    /// Layers are overridden with `PHOTONICS_LAYERS_<NAME>=layer/datatype`.
    pub fn with_env_overrides(mut self, env: &Env) -> Result<Self> {
        override_value(env, "path.npoints", &mut self.path.npoints)?;
        override_value(env, "path.straight_npoints", &mut self.path.straight_npoints)?;
        override_value(env, "smooth.radius", &mut self.smooth.radius)?;
        override_optional(env, "extrude.simplify", &mut self.extrude.simplify)?;
        override_optional(env, "extrude.snap_to_grid_nm", &mut self.extrude.snap_to_grid_nm)?;
        override_value(env, "extrude.rename_ports", &mut self.extrude.rename_ports)?;

        let prefix = format!("{}_", ConfigKey::from_str("layers").as_env_key());
        for (var, value) in env.with_prefix(&prefix) {
            let name = &var[prefix.len()..];
            let spec = value
                .parse()
                .with_context(|| format!("invalid value for environment variable `{var}`"))?;
            tracing::debug!(layer = name, %spec, "layer overridden from environment");
            self.layers.insert(name.to_string(), spec);
        }

        self.validate()?;
        Ok(self)
    }

    /// Looks up a named layer.
    pub fn layer(&self, name: &str) -> Option<LayerSpec> {
        self.layers.get(name).copied()
    }

    fn validate(&self) -> Result<()> {
        if self.path.npoints == 0 || self.path.straight_npoints < 2 {
            bail!(
                "path sampling must be positive (npoints = {}, straight_npoints = {})",
                self.path.npoints,
                self.path.straight_npoints
            );
        }
        if !(self.smooth.radius.is_finite() && self.smooth.radius > 0.0) {
            bail!("smooth.radius must be positive, got {}", self.smooth.radius);
        }
        if let Some(tol) = self.extrude.simplify {
            if !(tol.is_finite() && tol >= 0.0) {
                bail!("extrude.simplify must be non-negative, got {tol}");
            }
        }
        if self.extrude.snap_to_grid_nm == Some(0) {
            bail!("extrude.snap_to_grid_nm must be positive");
        }
        Ok(())
    }
}

fn override_value<T>(env: &Env, key: &str, slot: &mut T) -> Result<()>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let key = ConfigKey::from_str(key);
    if let Some(raw) = env.get(&key) {
        *slot = raw.trim().parse().with_context(|| {
            format!(
                "invalid value `{raw}` for `{key}` in environment variable `{}`",
                key.as_env_key()
            )
        })?;
        tracing::debug!(%key, value = raw, "overridden from environment");
    }
    Ok(())
}

fn override_optional<T>(env: &Env, key: &str, slot: &mut Option<T>) -> Result<()>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let key = ConfigKey::from_str(key);
    match env.get(&key).map(str::trim) {
        Some("") | Some("none") => *slot = None,
        Some(raw) => {
            *slot = Some(raw.parse().with_context(|| {
                format!(
                    "invalid value `{raw}` for `{key}` in environment variable `{}`",
                    key.as_env_key()
                )
            })?);
            tracing::debug!(%key, value = raw, "overridden from environment");
        }
        None => {}
    }
    Ok(())
}
