//! Port for minting session tokens.

use crate::domain::SessionKey;

/// Source of fresh, unguessable session keys.
#[cfg_attr(test, mockall::automock)]
pub trait SessionKeyGenerator: Send + Sync {
    fn generate(&self) -> SessionKey;
}
