//! A content-addressed cache for naming generated layout objects.
//!
//! Keys are serialized with flexbuffers and hashed with SHA-256, so two keys
//! that serialize to the same bytes always map to the same name. The in-memory
//! [`mem::NameCache`] remembers every name it hands out for the lifetime of the process.
#![warn(missing_docs)]

use serde::Serialize;
use sha2::{Digest, Sha256};

pub mod error;
pub mod mem;
#[cfg(test)]
pub(crate) mod tests;

/// Number of digest bytes rendered into a generated name.
pub const NAME_DIGEST_LEN: usize = 8;

/// Hashes the given bytes with SHA-256.
pub fn hash(val: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(val);
    hasher.finalize()[..].into()
}

/// Serializes `key` with flexbuffers and hashes the result.
pub fn hash_key<K: Serialize + ?Sized>(key: &K) -> error::Result<Vec<u8>> {
    let bytes = flexbuffers::to_vec(key)?;
    Ok(hash(&bytes))
}

/// Renders the first [`NAME_DIGEST_LEN`] bytes of `digest` as lowercase hex.
pub fn hex_digest(digest: &[u8]) -> String {
    hex::encode(&digest[..digest.len().min(NAME_DIGEST_LEN)])
}
