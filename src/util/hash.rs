//! Hashing utilities for stable identifiers.

use sha2::{Digest, Sha256};

/// Compute SHA256 hash of a byte slice.
pub fn sha256_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Compute SHA256 hash of a string.
pub fn sha256_str(s: &str) -> String {
    sha256_bytes(s.as_bytes())
}

/// Short, stable identifier for a list of strings.
///
/// Components are joined with a NUL separator, so `["ab", "c"]` and
/// `["a", "bc"]` hash differently. The result is the first 16 hex digits.
pub fn short_id<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let joined = parts.into_iter().collect::<Vec<_>>().join("\0");
    sha256_str(&joined)[..16].to_string()
}
