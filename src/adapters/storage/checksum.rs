//! Artifact checksums
//!
//! Published artifacts are logged with their SHA-256 so an uploaded object can
//! be matched against the staging run that produced it.

use sha2::{Digest, Sha256};

/// Calculate SHA-256 checksum of raw bytes
///
/// Returns a hex-encoded string (64 characters).
///
/// # Examples
///
/// ```
/// use gw_rdb::adapters::storage::checksum::sha256_hex;
///
/// let checksum = sha256_hex(b"# //UNITED STATES GEOLOGICAL SURVEY");
/// assert_eq!(checksum.len(), 64);
/// ```
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{result:x}")
}
