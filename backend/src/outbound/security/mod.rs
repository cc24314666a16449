//! Credential and token adapters.

mod sha512_password_hasher;
mod uuid_session_key_generator;

pub use sha512_password_hasher::Sha512PasswordHasher;
pub use uuid_session_key_generator::UuidSessionKeyGenerator;
