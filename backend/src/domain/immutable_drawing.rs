//! Content-addressed drawings published under short keys.
//!
//! A short key is a prefix of the SHA-512 digest of the drawing data. Rows
//! are written once and never modified apart from the hit counter.

use std::fmt;

use chrono::{DateTime, Utc};

use super::content_digest::{CONTENT_DIGEST_LENGTH, ContentDigest};

/// Validation errors for drawing payloads and keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawingValidationError {
    /// Drawing data was empty.
    EmptyData,
    /// Short key was empty, too long or not lowercase hex.
    MalformedShortKey,
    /// Name exceeded the column limit.
    NameTooLong { max: usize },
    /// Name was blank where one is required.
    EmptyName,
}

impl fmt::Display for DrawingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyData => write!(f, "drawing data must not be empty"),
            Self::MalformedShortKey => write!(
                f,
                "short key must be 1 to {CONTENT_DIGEST_LENGTH} lowercase hex characters"
            ),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::EmptyName => write!(f, "name must not be empty"),
        }
    }
}

impl std::error::Error for DrawingValidationError {}

/// Opaque drawing body. Stored and returned verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawingPayload(String);

impl DrawingPayload {
    /// Accept any non-empty body.
    pub fn new(raw: impl Into<String>) -> Result<Self, DrawingValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DrawingValidationError::EmptyData);
        }
        Ok(Self(raw))
    }

    /// Body text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Body bytes fed to the content hasher.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Consume the payload, returning the owned text.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Public identifier of an immutable drawing.
///
/// ## Invariants
/// - 1 to 128 lowercase hex characters, so it can only ever be a prefix of a
///   SHA-512 hex digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortKey(String);

impl ShortKey {
    /// Validate a key supplied by a caller.
    pub fn parse(raw: &str) -> Result<Self, DrawingValidationError> {
        let well_formed = !raw.is_empty()
            && raw.len() <= CONTENT_DIGEST_LENGTH
            && raw
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if well_formed {
            Ok(Self(raw.to_owned()))
        } else {
            Err(DrawingValidationError::MalformedShortKey)
        }
    }

    /// Take the first `length` characters of `digest`.
    ///
    /// Returns `None` when `length` is zero or longer than the digest.
    pub fn from_digest(digest: &ContentDigest, length: usize) -> Option<Self> {
        if length == 0 {
            return None;
        }
        digest.prefix(length).map(|prefix| Self(prefix.to_owned()))
    }

    /// Key text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Number of characters in the key.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; keys are never empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for ShortKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ShortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Row written by the key resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImmutableDrawing {
    pub short_key: ShortKey,
    pub content_digest: ContentDigest,
    pub data: DrawingPayload,
}

/// Stored immutable drawing as returned to readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImmutableDrawing {
    pub short_key: ShortKey,
    pub data: String,
    pub created_at: DateTime<Utc>,
}
