//! Key type for looking up configuration values.

use std::fmt;

/// The prefix shared by every environment override.
pub const ENV_PREFIX: &str = "PHOTONICS";

/// Key for a configuration variable.
///
/// Tracks both the dotted TOML path (`extrude.simplify`) and the matching
/// environment variable (`PHOTONICS_EXTRUDE_SIMPLIFY`).
#[derive(Debug, Clone)]
pub struct ConfigKey {
    // Looks like `PHOTONICS_FOO_BAR` after pushing `foo` and then `bar`.
    env: String,
    // Each part paired with the length of `env` before it was pushed.
    parts: Vec<(String, usize)>,
}

impl ConfigKey {
    /// Creates a blank key for the root table.
    #[allow(clippy::new_without_default)]
    pub fn new() -> ConfigKey {
        ConfigKey {
            env: ENV_PREFIX.to_string(),
            parts: Vec::new(),
        }
    }

    /// Creates a [`ConfigKey`] from a period-separated TOML key.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(key: &str) -> ConfigKey {
        let mut cfg = ConfigKey::new();
        for part in key.split('.') {
            cfg.push(part);
        }
        cfg
    }

    /// Pushes a sub-key, as if descending into a TOML sub-table.
    ///
    /// The env name receives `name` uppercased with dashes mapped to underscores.
    pub fn push(&mut self, name: &str) {
        self.parts.push((name.to_string(), self.env.len()));
        self.env.push('_');
        self.env.push_str(&name.replace('-', "_").to_uppercase());
    }

    /// Rewinds the last [`ConfigKey::push`]. Popping the root key is a no-op.
    pub fn pop(&mut self) {
        if let Some((_, env)) = self.parts.pop() {
            self.env.truncate(env);
        }
    }

    /// The environment variable name for this key.
    pub fn as_env_key(&self) -> &str {
        &self.env
    }

    /// Returns an iterator of the key parts.
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|p| p.0.as_ref())
    }

    /// Whether this is the key for the root table.
    pub fn is_root(&self) -> bool {
        self.parts.is_empty()
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<_> = self.parts().collect();
        parts.join(".").fmt(f)
    }
}
