//! PostgreSQL-backed `ImmutableDrawingRepository` implementation.
//!
//! Inserts are guarded by the `immutable_drawings_pkey` constraint; a
//! violation of that constraint is reported as [`ShortKeyInsertOutcome::ShortKeyTaken`]
//! so the key resolver can disambiguate.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    ImmutableDrawingPersistenceError, ImmutableDrawingRepository, ShortKeyInsertOutcome,
};
use crate::domain::{ContentDigest, ImmutableDrawing, NewImmutableDrawing, ShortKey};

use super::diesel_basic_error_mapping::{
    affected_rows, is_unique_violation_of, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{ImmutableDrawingRow, NewImmutableDrawingRow};
use super::pool::{DbPool, PoolError};
use super::schema::immutable_drawings;

/// Primary key constraint on `immutable_drawings.short_key`.
const SHORT_KEY_CONSTRAINT: &str = "immutable_drawings_pkey";

/// Diesel-backed implementation of the immutable drawing repository port.
#[derive(Clone)]
pub struct DieselImmutableDrawingRepository {
    pool: DbPool,
}

impl DieselImmutableDrawingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ImmutableDrawingPersistenceError {
    map_basic_pool_error(error, ImmutableDrawingPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ImmutableDrawingPersistenceError {
    map_basic_diesel_error(
        error,
        ImmutableDrawingPersistenceError::query,
        ImmutableDrawingPersistenceError::connection,
    )
}

fn row_to_drawing(
    row: ImmutableDrawingRow,
) -> Result<ImmutableDrawing, ImmutableDrawingPersistenceError> {
    let short_key = ShortKey::parse(&row.short_key).map_err(|err| {
        ImmutableDrawingPersistenceError::query(format!("stored short key is invalid: {err}"))
    })?;
    Ok(ImmutableDrawing {
        short_key,
        data: row.data,
        created_at: row.created_at,
    })
}

#[async_trait]
impl ImmutableDrawingRepository for DieselImmutableDrawingRepository {
    async fn insert(
        &self,
        drawing: &NewImmutableDrawing,
    ) -> Result<ShortKeyInsertOutcome, ImmutableDrawingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewImmutableDrawingRow {
            short_key: drawing.short_key.as_str(),
            content_digest: drawing.content_digest.as_str(),
            data: drawing.data.as_str(),
        };

        let result = diesel::insert_into(immutable_drawings::table)
            .values(&row)
            .execute(&mut conn)
            .await;

        match result {
            Ok(_) => Ok(ShortKeyInsertOutcome::Inserted),
            Err(err) if is_unique_violation_of(&err, SHORT_KEY_CONSTRAINT) => {
                Ok(ShortKeyInsertOutcome::ShortKeyTaken)
            }
            Err(err) => Err(map_diesel_error(err)),
        }
    }

    async fn find_digest(
        &self,
        short_key: &ShortKey,
    ) -> Result<Option<ContentDigest>, ImmutableDrawingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let digest = immutable_drawings::table
            .filter(immutable_drawings::short_key.eq(short_key.as_str()))
            .select(immutable_drawings::content_digest)
            .first::<String>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        digest
            .map(|raw| {
                ContentDigest::parse(raw).map_err(|err| {
                    ImmutableDrawingPersistenceError::query(format!("stored digest: {err}"))
                })
            })
            .transpose()
    }

    async fn record_hit(
        &self,
        short_key: &ShortKey,
    ) -> Result<u64, ImmutableDrawingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(
            immutable_drawings::table.filter(immutable_drawings::short_key.eq(short_key.as_str())),
        )
        .set(immutable_drawings::hits.eq(immutable_drawings::hits + 1))
        .execute(&mut conn)
        .await
        .map(affected_rows)
        .map_err(map_diesel_error)
    }

    async fn find(
        &self,
        short_key: &ShortKey,
    ) -> Result<Option<ImmutableDrawing>, ImmutableDrawingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = immutable_drawings::table
            .filter(immutable_drawings::short_key.eq(short_key.as_str()))
            .select(ImmutableDrawingRow::as_select())
            .first::<ImmutableDrawingRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_drawing).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    #[rstest]
    fn not_found_maps_to_query_error() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, ImmutableDrawingPersistenceError::Query { .. }));
    }

    #[rstest]
    fn corrupt_short_key_is_rejected() {
        let err = row_to_drawing(ImmutableDrawingRow {
            short_key: "NOT HEX".to_owned(),
            data: "{}".to_owned(),
            created_at: Utc::now(),
        })
        .expect_err("invalid key");
        assert!(err.to_string().contains("stored short key is invalid"));
    }
}
