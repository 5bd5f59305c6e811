//! In-memory naming cache.

use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use arcstr::ArcStr;
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::{error::Result, hash_key, hex_digest};

/// The most names the process-wide cache holds before it starts over.
pub const GLOBAL_CAPACITY: usize = 1 << 16;

static GLOBAL: Lazy<NameCache> = Lazy::new(|| NameCache::with_capacity_limit(GLOBAL_CAPACITY));

/// Maps serialized keys to stable, content-derived names.
///
/// Identical keys under the same prefix always receive the same name. Names
/// depend only on the key, so a bounded cache that drops its entries when full
/// still hands out the same name for a key it has forgotten.
#[derive(Debug, Default)]
pub struct NameCache {
    names: RwLock<HashMap<Vec<u8>, ArcStr>>,
    limit: Option<usize>,
}

impl NameCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache that holds at most `limit` names.
    ///
    /// Assigning a new name to a full cache first forgets every stored name.
    pub fn with_capacity_limit(limit: usize) -> Self {
        Self {
            names: RwLock::default(),
            limit: Some(limit.max(1)),
        }
    }

    /// The process-wide cache, bounded by [`GLOBAL_CAPACITY`] entries.
    ///
    /// Call [`NameCache::clear`] to release its memory sooner.
    pub fn global() -> &'static NameCache {
        &GLOBAL
    }

    fn digest<K: Serialize + ?Sized>(prefix: &str, key: &K) -> Result<Vec<u8>> {
        let mut digest = hash_key(key)?;
        digest.extend_from_slice(prefix.as_bytes());
        Ok(digest)
    }

    /// Returns the name for `key`, assigning `{prefix}_{digest}` on first use.
    pub fn get_or_assign<K: Serialize + ?Sized>(&self, prefix: &str, key: &K) -> Result<ArcStr> {
        let digest = Self::digest(prefix, key)?;
        if let Some(name) = self
            .names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&digest)
        {
            return Ok(name.clone());
        }

        let mut names = self.names.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(limit) = self.limit {
            if names.len() >= limit && !names.contains_key(&digest) {
                tracing::debug!(limit, "name cache full, forgetting assigned names");
                names.clear();
            }
        }
        let name = names
            .entry(digest)
            .or_insert_with_key(|digest| {
                let name = arcstr::format!("{}_{}", prefix, hex_digest(digest));
                tracing::trace!(%name, "assigned name");
                name
            })
            .clone();
        Ok(name)
    }

    /// Returns the name previously assigned to `key`, if any.
    pub fn get<K: Serialize + ?Sized>(&self, prefix: &str, key: &K) -> Result<Option<ArcStr>> {
        let digest = Self::digest(prefix, key)?;
        Ok(self
            .names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&digest)
            .cloned())
    }

    /// The number of assigned names.
    pub fn len(&self) -> usize {
        self.names.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if no names have been assigned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every assigned name and releases the memory they use.
    ///
    /// Keys assigned again afterwards receive the same names as before.
    pub fn clear(&self) {
        *self.names.write().unwrap_or_else(PoisonError::into_inner) = HashMap::new();
    }

    /// The most names this cache holds, if it is bounded.
    pub fn capacity_limit(&self) -> Option<usize> {
        self.limit
    }
}
