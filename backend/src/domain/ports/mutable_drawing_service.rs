//! Driving port for owner-scoped drawing use-cases.

use async_trait::async_trait;

use crate::domain::{
    DrawingChanges, DrawingId, DrawingName, DrawingPayload, Error, MutableDrawing,
    MutableDrawingSummary, UserId,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MutableDrawingService: Send + Sync {
    async fn create(
        &self,
        caller: UserId,
        name: DrawingName,
        data: DrawingPayload,
    ) -> Result<DrawingId, Error>;

    /// Rows affected: 0 when the drawing is missing or not the caller's.
    async fn update(
        &self,
        caller: UserId,
        id: DrawingId,
        changes: DrawingChanges,
    ) -> Result<u64, Error>;

    /// Rows affected: 0 when the drawing is missing or not the caller's.
    async fn delete(&self, caller: UserId, id: DrawingId) -> Result<u64, Error>;

    async fn get(&self, caller: UserId, id: DrawingId) -> Result<Option<MutableDrawing>, Error>;

    /// At most one page of the caller's drawings, newest first.
    async fn list(&self, caller: UserId) -> Result<Vec<MutableDrawingSummary>, Error>;
}
