//! Salted SHA-512 password hasher.
//!
//! Stored format: `sha512$<salt-hex>$<digest-hex>` where the digest is
//! `SHA-512(salt || password)`.
//!
//! A single salted SHA-512 round is a fast hash, not a password key
//! derivation function: it resists rainbow tables but not offline brute force
//! of a leaked `users` table. Deployments that need that should plug a
//! memory-hard KDF (Argon2id, scrypt) in behind the
//! [`PasswordHasher`](crate::domain::ports::PasswordHasher) port. The scheme
//! tag makes the stored formats distinguishable, and this adapter refuses to
//! verify hashes carrying any other tag.

use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHash, PasswordHashError, PasswordHasher};

const SCHEME: &str = "sha512";
const SALT_LENGTH: usize = 16;

/// Password hasher producing salted SHA-512 digests.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha512PasswordHasher;

fn salted_digest(salt: &[u8], password: &str) -> Zeroizing<Vec<u8>> {
    let mut hasher = Sha512::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    Zeroizing::new(hasher.finalize().to_vec())
}

fn decode(stored: &PasswordHash) -> Option<(Vec<u8>, Vec<u8>)> {
    let mut parts = stored.as_str().splitn(3, '$');
    if parts.next()? != SCHEME {
        return None;
    }
    let salt = hex::decode(parts.next()?).ok()?;
    let digest = hex::decode(parts.next()?).ok()?;
    Some((salt, digest))
}

impl PasswordHasher for Sha512PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let mut salt = [0_u8; SALT_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        let digest = salted_digest(&salt, password);
        Ok(PasswordHash::new(format!(
            "{SCHEME}${}${}",
            hex::encode(salt),
            hex::encode(digest.as_slice())
        )))
    }

    fn verify(&self, password: &str, stored: &PasswordHash) -> bool {
        let Some((salt, expected)) = decode(stored) else {
            return false;
        };
        let actual = salted_digest(&salt, password);
        actual.as_slice().ct_eq(expected.as_slice()).into()
    }
}
