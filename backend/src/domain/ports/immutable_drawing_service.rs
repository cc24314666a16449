//! Driving port for publishing and reading content-addressed drawings.

use async_trait::async_trait;

use crate::domain::{DrawingPayload, Error, ImmutableDrawing, ShortKey};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImmutableDrawingService: Send + Sync {
    /// Publish `data` and return its short key. Identical data always yields
    /// the same key.
    async fn create(&self, data: DrawingPayload) -> Result<ShortKey, Error>;

    /// Read a published drawing.
    async fn get(&self, short_key: &ShortKey) -> Result<Option<ImmutableDrawing>, Error>;
}
