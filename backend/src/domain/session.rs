//! Opaque session tokens.

use std::fmt;

use uuid::Uuid;

/// Longest token accepted from a caller. Generated keys are far shorter.
pub const SESSION_KEY_MAX_LENGTH: usize = 128;

/// Validation errors for presented session tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKeyError {
    /// Token was empty.
    Empty,
    /// Token exceeded [`SESSION_KEY_MAX_LENGTH`] bytes.
    TooLong,
    /// Token contained whitespace or control characters.
    InvalidCharacters,
}

impl fmt::Display for SessionKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "session key must not be empty"),
            Self::TooLong => {
                write!(f, "session key must be at most {SESSION_KEY_MAX_LENGTH} bytes")
            }
            Self::InvalidCharacters => write!(f, "session key contains invalid characters"),
        }
    }
}

impl std::error::Error for SessionKeyError {}

/// Bearer token binding a caller to a user.
///
/// The `Debug` output is redacted so tokens never reach logs.
///
/// # Examples
/// ```
/// use cascii::domain::SessionKey;
///
/// let key = SessionKey::new("8f14e45f-ceea-467f-a0e6-2f3c1c3b1b4d").expect("valid key");
/// assert_eq!(format!("{key:?}"), "SessionKey(..)");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionKey(String);

impl SessionKey {
    /// Validate a presented token.
    pub fn new(raw: impl Into<String>) -> Result<Self, SessionKeyError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(SessionKeyError::Empty);
        }
        if raw.len() > SESSION_KEY_MAX_LENGTH {
            return Err(SessionKeyError::TooLong);
        }
        if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(SessionKeyError::InvalidCharacters);
        }
        Ok(Self(raw))
    }

    /// Key minted from a random UUID, in hyphenated lowercase form.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id.hyphenated().to_string())
    }

    /// Token value, as written to the cookie.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for SessionKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionKey(..)")
    }
}
