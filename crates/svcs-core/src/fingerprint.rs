//! Content fingerprint over the tracked file set.
//!
//! The fingerprint is the SHA-256 digest of the concatenated bytes of every
//! tracked file, in tracked order with no delimiters. The digest is read as
//! an unsigned big-endian integer and rendered in lowercase hexadecimal
//! without leading zeros, then left-padded with `0` to at least
//! [`MIN_WIDTH`] characters. The width is a floor: a full digest renders as
//! 64 characters unless its leading nibbles are zero.
//!
//! Nothing here caches: callers compute a fresh fingerprint for every commit
//! and dedup check.

use sha2::{Digest, Sha256};

/// Minimum rendered width of a fingerprint
pub const MIN_WIDTH: usize = 32;

/// Content-derived commit identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Wrap an already rendered fingerprint (e.g. read back from the log)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    /// Render a raw SHA-256 digest
    pub fn from_digest(digest: &[u8]) -> Self {
        let hex = hex::encode(digest);
        let significant = hex.trim_start_matches('0');
        Self(format!("{:0>width$}", significant, width = MIN_WIDTH))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Fingerprint the ordered contents of the tracked files
///
/// ## Example
///
/// ```
/// use svcs_core::fingerprint::fingerprint;
///
/// let a = fingerprint([b"hello".as_slice()]);
/// let b = fingerprint([b"hel".as_slice(), b"lo".as_slice()]);
/// // No delimiter between files: only the concatenation matters
/// assert_eq!(a, b);
/// ```
pub fn fingerprint<I, B>(contents: I) -> Fingerprint
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut hasher = Sha256::new();
    for content in contents {
        hasher.update(content.as_ref());
    }
    Fingerprint::from_digest(&hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest_of_hello() {
        // sha256("hello")
        let fp = fingerprint([b"hello"]);
        assert_eq!(
            fp.as_str(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_leading_zero_nibbles_are_dropped() {
        let mut digest = [0xabu8; 32];
        digest[0] = 0x00;
        digest[1] = 0x0f;
        let fp = Fingerprint::from_digest(&digest);
        assert_eq!(fp.as_str().len(), 61);
        assert!(fp.as_str().starts_with("fab"));
    }

    #[test]
    fn test_min_width_is_a_floor() {
        let mut digest = [0u8; 32];
        digest[31] = 0x01;
        let fp = Fingerprint::from_digest(&digest);
        assert_eq!(fp.as_str().len(), MIN_WIDTH);
        assert_eq!(fp.as_str(), format!("{}1", "0".repeat(MIN_WIDTH - 1)));

        let zero = Fingerprint::from_digest(&[0u8; 32]);
        assert_eq!(zero.as_str(), "0".repeat(MIN_WIDTH));
    }

    #[test]
    fn test_order_sensitive() {
        let ab = fingerprint([b"a".as_slice(), b"b".as_slice()]);
        let ba = fingerprint([b"b".as_slice(), b"a".as_slice()]);
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_empty_input() {
        // sha256("")
        let fp = fingerprint(std::iter::empty::<&[u8]>());
        assert_eq!(
            fp.as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
