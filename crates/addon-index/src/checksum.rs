//! MD5 checksum for channel manifests.
//!
//! The checksum file holds the bare lowercase hex digest of the exact bytes
//! written to `addons.xml`, with no trailing newline or file name. Kodi
//! compares it against its cached copy to decide whether to refetch the
//! manifest, so the format cannot change.

use md5::{Digest, Md5};

/// Calculates the MD5 digest of `data` as 32 lowercase hex characters.
///
/// # Examples
///
/// ```
/// use addon_index::checksum::md5_hex;
///
/// let checksum = md5_hex(b"hello world");
/// assert_eq!(checksum, "5eb63bbbe01eeed093cb22bb8f5acdc3");
/// assert_eq!(checksum.len(), 32);
/// ```
#[must_use]
pub fn md5_hex(data: &[u8]) -> String {
    hex::encode(Md5::digest(data))
}
