//! Port for content-addressed drawing storage.

use async_trait::async_trait;

use crate::domain::{ContentDigest, ImmutableDrawing, NewImmutableDrawing, ShortKey};

use super::define_port_error;

define_port_error! {
    /// Errors raised by immutable drawing repository adapters.
    pub enum ImmutableDrawingPersistenceError {
        /// Repository connection could not be established.
        Connection => "immutable drawing repository connection failed",
        /// Query or mutation failed during execution.
        Query => "immutable drawing repository query failed",
    }
}

/// Outcome of an insert guarded by the unique short-key constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortKeyInsertOutcome {
    /// Row written.
    Inserted,
    /// A row already holds this short key. Only the short-key constraint
    /// maps here; every other failure is an error.
    ShortKeyTaken,
}

/// Immutable drawings keyed by short key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImmutableDrawingRepository: Send + Sync {
    /// Attempt to write a new row.
    async fn insert(
        &self,
        drawing: &NewImmutableDrawing,
    ) -> Result<ShortKeyInsertOutcome, ImmutableDrawingPersistenceError>;

    /// Digest stored under `short_key`.
    async fn find_digest(
        &self,
        short_key: &ShortKey,
    ) -> Result<Option<ContentDigest>, ImmutableDrawingPersistenceError>;

    /// Increment the hit counter. Returns the number of rows touched.
    async fn record_hit(&self, short_key: &ShortKey)
    -> Result<u64, ImmutableDrawingPersistenceError>;

    /// Fetch the drawing published under `short_key`.
    async fn find(
        &self,
        short_key: &ShortKey,
    ) -> Result<Option<ImmutableDrawing>, ImmutableDrawingPersistenceError>;
}
