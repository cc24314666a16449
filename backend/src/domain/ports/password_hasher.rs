//! Port for one-way password hashing.

use std::fmt;

use super::define_port_error;

define_port_error! {
    /// Errors raised while producing a password hash.
    pub enum PasswordHashError {
        /// The hasher could not produce a hash.
        Hashing => "password hashing failed",
    }
}

/// Opaque stored password hash. Its format belongs to the hasher adapter.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Hash and verify passwords. Verification must run in constant time with
/// respect to the stored hash.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Derive a storable hash for `password`.
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Check `password` against `stored`. Malformed hashes never verify.
    fn verify(&self, password: &str, stored: &PasswordHash) -> bool;
}
