//! Port for owner-scoped drawing storage.
//!
//! Every operation that names an existing drawing takes the caller's id and
//! must apply `id` and `owner` in the same storage predicate. A drawing owned
//! by someone else is indistinguishable from one that does not exist.

use async_trait::async_trait;

use crate::domain::{
    DrawingChanges, DrawingId, MutableDrawing, MutableDrawingSummary, NewMutableDrawing, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by mutable drawing repository adapters.
    pub enum MutableDrawingPersistenceError {
        /// Repository connection could not be established.
        Connection => "mutable drawing repository connection failed",
        /// Query or mutation failed during execution.
        Query => "mutable drawing repository query failed",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MutableDrawingRepository: Send + Sync {
    /// Insert a drawing and return its identifier.
    async fn create(
        &self,
        drawing: &NewMutableDrawing,
    ) -> Result<DrawingId, MutableDrawingPersistenceError>;

    /// Apply `changes` to the caller's drawing. Returns rows affected (0 or 1).
    async fn update(
        &self,
        owner: UserId,
        id: DrawingId,
        changes: &DrawingChanges,
    ) -> Result<u64, MutableDrawingPersistenceError>;

    /// Delete the caller's drawing. Returns rows affected (0 or 1).
    async fn delete(&self, owner: UserId, id: DrawingId)
    -> Result<u64, MutableDrawingPersistenceError>;

    /// Fetch the caller's drawing.
    async fn find(
        &self,
        owner: UserId,
        id: DrawingId,
    ) -> Result<Option<MutableDrawing>, MutableDrawingPersistenceError>;

    /// Newest-first summaries of the caller's drawings, at most `limit` rows.
    async fn list(
        &self,
        owner: UserId,
        limit: i64,
    ) -> Result<Vec<MutableDrawingSummary>, MutableDrawingPersistenceError>;
}
