//! Snapshot of the process environment.

use std::collections::HashMap;

use crate::key::{ConfigKey, ENV_PREFIX};

/// Environment variables relevant to configuration.
///
/// Only variables starting with the `PHOTONICS_` prefix are retained. Tests
/// build one from a map with [`Env::from_map`] instead of touching process state.
#[derive(Debug, Clone, Default)]
pub struct Env {
    vars: HashMap<String, String>,
}

impl Env {
    /// Captures the current process environment.
    pub fn new() -> Self {
        Self::from_map(std::env::vars())
    }

    /// Builds an environment from explicit key-value pairs.
    pub fn from_map<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| k.starts_with(ENV_PREFIX))
            .collect();
        Self { vars }
    }

    /// The value of the variable that overrides `key`, if set.
    pub fn get(&self, key: &ConfigKey) -> Option<&str> {
        self.vars.get(key.as_env_key()).map(String::as_str)
    }

    /// Iterates over variables whose names begin with `prefix`.
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.vars
            .iter()
            .filter(move |(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
