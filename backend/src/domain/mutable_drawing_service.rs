//! Owner-scoped drawing use-cases.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::Error;
use super::immutable_drawing::DrawingPayload;
use super::mutable_drawing::{
    DrawingChanges, DrawingId, DrawingName, MUTABLE_DRAWING_PAGE_SIZE, MutableDrawing,
    MutableDrawingSummary, NewMutableDrawing,
};
use super::ports::{MutableDrawingPersistenceError, MutableDrawingRepository, MutableDrawingService};
use super::user::UserId;

fn map_repository_error(error: MutableDrawingPersistenceError) -> Error {
    match error {
        MutableDrawingPersistenceError::Connection { message } => Error::service_unavailable(
            format!("mutable drawing repository unavailable: {message}"),
        ),
        MutableDrawingPersistenceError::Query { message } => {
            Error::internal(format!("mutable drawing repository error: {message}"))
        }
    }
}

/// Mutable drawing service. The caller id always comes from the session.
#[derive(Clone)]
pub struct OwnedDrawingService<R> {
    repository: Arc<R>,
}

impl<R> OwnedDrawingService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> MutableDrawingService for OwnedDrawingService<R>
where
    R: MutableDrawingRepository,
{
    async fn create(
        &self,
        caller: UserId,
        name: DrawingName,
        data: DrawingPayload,
    ) -> Result<DrawingId, Error> {
        let drawing = NewMutableDrawing {
            owner: caller,
            name,
            data,
        };
        let id = self
            .repository
            .create(&drawing)
            .await
            .map_err(map_repository_error)?;
        debug!(user_id = %caller, drawing_id = %id, "drawing created");
        Ok(id)
    }

    async fn update(
        &self,
        caller: UserId,
        id: DrawingId,
        changes: DrawingChanges,
    ) -> Result<u64, Error> {
        self.repository
            .update(caller, id, &changes)
            .await
            .map_err(map_repository_error)
    }

    async fn delete(&self, caller: UserId, id: DrawingId) -> Result<u64, Error> {
        self.repository
            .delete(caller, id)
            .await
            .map_err(map_repository_error)
    }

    async fn get(&self, caller: UserId, id: DrawingId) -> Result<Option<MutableDrawing>, Error> {
        self.repository
            .find(caller, id)
            .await
            .map_err(map_repository_error)
    }

    async fn list(&self, caller: UserId) -> Result<Vec<MutableDrawingSummary>, Error> {
        self.repository
            .list(caller, MUTABLE_DRAWING_PAGE_SIZE)
            .await
            .map_err(map_repository_error)
    }
}
