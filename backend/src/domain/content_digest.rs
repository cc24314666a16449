//! Content digests used for addressing immutable drawings.

use std::fmt;

use sha2::{Digest, Sha512};

/// Length in hex characters of a SHA-512 digest.
pub const CONTENT_DIGEST_LENGTH: usize = 128;

/// Error raised when a stored digest does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("content digest must be {CONTENT_DIGEST_LENGTH} lowercase hex characters")]
pub struct ContentDigestError;

/// Fixed-length lowercase hex fingerprint of drawing content.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Validate a digest read back from storage.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ContentDigestError> {
        let raw = raw.into();
        let well_formed = raw.len() == CONTENT_DIGEST_LENGTH
            && raw
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if well_formed {
            Ok(Self(raw))
        } else {
            Err(ContentDigestError)
        }
    }

    /// First `length` characters, or `None` when `length` exceeds the digest.
    pub fn prefix(&self, length: usize) -> Option<&str> {
        self.0.get(..length)
    }

    /// Full hex string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentDigest({})", self.0)
    }
}

/// Deterministic content fingerprinting capability.
pub trait ContentHasher: Send + Sync {
    /// Digest `content`. Identical bytes always produce identical digests.
    fn digest(&self, content: &[u8]) -> ContentDigest;
}

/// SHA-512 content hasher producing 128 hex characters.
///
/// # Examples
/// ```
/// use cascii::domain::{ContentHasher, Sha512Hasher};
///
/// let digest = Sha512Hasher.digest(br#"{"test": "test"}"#);
/// assert_eq!(digest.prefix(5), Some("c59e4"));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha512Hasher;

impl ContentHasher for Sha512Hasher {
    fn digest(&self, content: &[u8]) -> ContentDigest {
        ContentDigest(hex::encode(Sha512::digest(content)))
    }
}
