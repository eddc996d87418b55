//! Identity hash for sitemap URLs.

use std::fmt::Write;

use sha2::{Digest, Sha256};

/// Length in hex characters of every value returned by [`url_hash`].
pub const URL_HASH_LEN: usize = 32;

/// Derive the deduplication key for a URL.
///
/// Takes the first 16 bytes of SHA-256 over the raw URL bytes and renders
/// them as lowercase hex. The URL is not normalized first, so
/// `https://a.com/x` and `https://a.com/x/` are different keys.
#[must_use]
pub fn url_hash(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    digest[..URL_HASH_LEN / 2]
        .iter()
        .fold(String::with_capacity(URL_HASH_LEN), |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        })
}
