//! UUID v4 session keys.

use uuid::Uuid;

use crate::domain::SessionKey;
use crate::domain::ports::SessionKeyGenerator;

/// Mints hyphenated UUID v4 session keys from the OS random source.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSessionKeyGenerator;

impl SessionKeyGenerator for UuidSessionKeyGenerator {
    fn generate(&self) -> SessionKey {
        SessionKey::from_uuid(Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn keys_are_unique_uuids() {
        let first = UuidSessionKeyGenerator.generate();
        let second = UuidSessionKeyGenerator.generate();
        assert_ne!(first, second);
        assert!(Uuid::parse_str(first.as_str()).is_ok());
    }
}
