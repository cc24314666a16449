//! Shortest-unique-prefix key derivation for immutable drawings.
//!
//! Resolution is insert-first: each candidate prefix is written under the
//! storage layer's unique constraint and only a reported collision triggers a
//! read of the stored digest. A matching digest means the content is already
//! published; a different one escalates to the next prefix length.

use std::ops::RangeInclusive;
use std::sync::Arc;

use tracing::{debug, error};

use super::content_digest::{CONTENT_DIGEST_LENGTH, ContentDigest, ContentHasher, Sha512Hasher};
use super::immutable_drawing::{DrawingPayload, NewImmutableDrawing, ShortKey};
use super::ports::{
    ImmutableDrawingPersistenceError, ImmutableDrawingRepository, ShortKeyInsertOutcome,
};

/// Default shortest prefix tried.
pub const DEFAULT_SHORT_KEY_MIN_LENGTH: usize = 5;
/// Default longest prefix tried.
pub const DEFAULT_SHORT_KEY_MAX_LENGTH: usize = 10;

/// Rejected prefix-length bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("short key lengths must satisfy 1 <= min ({min}) <= max ({max}) <= {CONTENT_DIGEST_LENGTH}")]
pub struct KeyLengthPolicyError {
    pub min: usize,
    pub max: usize,
}

/// Inclusive range of prefix lengths the resolver tries, shortest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyLengthPolicy {
    min: usize,
    max: usize,
}

impl KeyLengthPolicy {
    /// Validate `min..=max` against the digest length.
    pub fn new(min: usize, max: usize) -> Result<Self, KeyLengthPolicyError> {
        if min == 0 || min > max || max > CONTENT_DIGEST_LENGTH {
            return Err(KeyLengthPolicyError { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Candidate lengths in the order they are tried.
    pub fn lengths(&self) -> RangeInclusive<usize> {
        self.min..=self.max
    }
}

impl Default for KeyLengthPolicy {
    fn default() -> Self {
        Self {
            min: DEFAULT_SHORT_KEY_MIN_LENGTH,
            max: DEFAULT_SHORT_KEY_MAX_LENGTH,
        }
    }
}

/// Failures while publishing content under a short key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyResolutionError {
    /// Every allowed prefix is held by different content.
    #[error("key resolution exhausted after {attempts} attempts for digest {digest}")]
    Exhausted {
        digest: ContentDigest,
        attempts: usize,
    },
    /// Storage failed; never retried.
    #[error(transparent)]
    Storage(#[from] ImmutableDrawingPersistenceError),
    /// Storage reported the key as taken but holds no row for it.
    #[error("short key {short_key} reported taken but no row holds it")]
    MissingRow { short_key: ShortKey },
}

/// Derives and persists the shortest unambiguous key for new content.
pub struct KeyResolver<R, H = Sha512Hasher> {
    repository: Arc<R>,
    hasher: H,
    policy: KeyLengthPolicy,
}

impl<R, H> KeyResolver<R, H> {
    pub fn new(repository: Arc<R>, hasher: H, policy: KeyLengthPolicy) -> Self {
        Self {
            repository,
            hasher,
            policy,
        }
    }

    pub fn policy(&self) -> KeyLengthPolicy {
        self.policy
    }
}

impl<R, H> KeyResolver<R, H>
where
    R: ImmutableDrawingRepository,
    H: ContentHasher,
{
    /// Publish `data`, returning the key it is (or already was) stored under.
    pub async fn resolve(&self, data: &DrawingPayload) -> Result<ShortKey, KeyResolutionError> {
        let digest = self.hasher.digest(data.as_bytes());
        let mut attempts = 0;

        for length in self.policy.lengths() {
            let Some(candidate) = ShortKey::from_digest(&digest, length) else {
                break;
            };
            attempts += 1;

            let row = NewImmutableDrawing {
                short_key: candidate.clone(),
                content_digest: digest.clone(),
                data: data.clone(),
            };
            match self.repository.insert(&row).await? {
                ShortKeyInsertOutcome::Inserted => return Ok(candidate),
                ShortKeyInsertOutcome::ShortKeyTaken => {}
            }

            match self.repository.find_digest(&candidate).await? {
                Some(stored) if stored == digest => {
                    debug!(short_key = %candidate, "content already published");
                    return Ok(candidate);
                }
                Some(_) => {
                    debug!(short_key = %candidate, length, "short key collision, extending");
                }
                None => return Err(KeyResolutionError::MissingRow { short_key: candidate }),
            }
        }

        error!(
            %digest,
            attempts,
            min = self.policy.min(),
            max = self.policy.max(),
            "key resolution exhausted"
        );
        Err(KeyResolutionError::Exhausted { digest, attempts })
    }
}
