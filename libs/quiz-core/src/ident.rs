//! Stable content-derived identifiers.

use sha2::{Digest, Sha256};

/// Length of every generated identifier.
const ID_LEN: usize = 24;

/// Derive a short deterministic identifier from ordered string parts.
///
/// Each part is hashed followed by a `|` separator byte so that
/// `["ab", "c"]` and `["a", "bc"]` produce different ids. The same parts
/// always yield the same id; there is no randomness and no clock.
pub fn stable_id(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update(b"|");
    }
    let digest = format!("{:x}", hasher.finalize());
    digest[..ID_LEN].to_string()
}
