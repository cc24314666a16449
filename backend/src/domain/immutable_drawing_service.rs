//! Publishing and reading content-addressed drawings.
//!
//! Reads bump a hit counter on a detached task. The counter is best effort:
//! the read neither waits for it nor fails with it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use super::Error;
use super::TraceId;
use super::content_digest::ContentHasher;
use super::immutable_drawing::{DrawingPayload, ImmutableDrawing, ShortKey};
use super::key_resolver::{KeyLengthPolicy, KeyResolutionError, KeyResolver};
use super::ports::{
    ImmutableDrawingPersistenceError, ImmutableDrawingRepository, ImmutableDrawingService,
};

fn map_repository_error(error: ImmutableDrawingPersistenceError) -> Error {
    match error {
        ImmutableDrawingPersistenceError::Connection { message } => Error::service_unavailable(
            format!("immutable drawing repository unavailable: {message}"),
        ),
        ImmutableDrawingPersistenceError::Query { message } => {
            Error::internal(format!("immutable drawing repository error: {message}"))
        }
    }
}

fn map_resolution_error(error: KeyResolutionError) -> Error {
    match error {
        KeyResolutionError::Storage(err) => map_repository_error(err),
        KeyResolutionError::MissingRow { short_key } => {
            error!(%short_key, "short key collision without a stored row");
            Error::internal(format!("short key {short_key} vanished during resolution"))
        }
        exhausted @ KeyResolutionError::Exhausted { .. } => Error::internal(exhausted.to_string()),
    }
}

/// Immutable drawing service over a repository and a content hasher.
pub struct PublishedDrawingService<R, H> {
    repository: Arc<R>,
    resolver: KeyResolver<R, H>,
}

impl<R, H> PublishedDrawingService<R, H> {
    pub fn new(repository: Arc<R>, hasher: H, policy: KeyLengthPolicy) -> Self {
        Self {
            resolver: KeyResolver::new(Arc::clone(&repository), hasher, policy),
            repository,
        }
    }
}

impl<R, H> PublishedDrawingService<R, H>
where
    R: ImmutableDrawingRepository + 'static,
{
    fn spawn_hit(&self, short_key: &ShortKey) {
        let repository = Arc::clone(&self.repository);
        let short_key = short_key.clone();
        let task = async move {
            if let Err(err) = repository.record_hit(&short_key).await {
                warn!(%short_key, error = %err, "failed to record drawing hit");
            }
        };
        // Task-locals do not follow spawned work.
        drop(match TraceId::current() {
            Some(trace_id) => tokio::spawn(TraceId::scope(trace_id, task)),
            None => tokio::spawn(task),
        });
    }
}

#[async_trait]
impl<R, H> ImmutableDrawingService for PublishedDrawingService<R, H>
where
    R: ImmutableDrawingRepository + 'static,
    H: ContentHasher,
{
    async fn create(&self, data: DrawingPayload) -> Result<ShortKey, Error> {
        self.resolver
            .resolve(&data)
            .await
            .map_err(map_resolution_error)
    }

    async fn get(&self, short_key: &ShortKey) -> Result<Option<ImmutableDrawing>, Error> {
        self.spawn_hit(short_key);
        self.repository
            .find(short_key)
            .await
            .map_err(map_repository_error)
    }
}
