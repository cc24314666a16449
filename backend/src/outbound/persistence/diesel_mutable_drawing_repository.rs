//! PostgreSQL-backed `MutableDrawingRepository` implementation.
//!
//! Every statement that names an existing drawing filters on both `id` and
//! `owner_id`, so a foreign row behaves exactly like a missing one.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MutableDrawingPersistenceError, MutableDrawingRepository};
use crate::domain::{
    DrawingChanges, DrawingId, MutableDrawing, MutableDrawingSummary, NewMutableDrawing, UserId,
};

use super::diesel_basic_error_mapping::{
    affected_rows, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{
    MutableDrawingChangeset, MutableDrawingRow, MutableDrawingSummaryRow, NewMutableDrawingRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::mutable_drawings;

/// Diesel-backed implementation of the mutable drawing repository port.
#[derive(Clone)]
pub struct DieselMutableDrawingRepository {
    pool: DbPool,
}

impl DieselMutableDrawingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MutableDrawingPersistenceError {
    map_basic_pool_error(error, MutableDrawingPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> MutableDrawingPersistenceError {
    map_basic_diesel_error(
        error,
        MutableDrawingPersistenceError::query,
        MutableDrawingPersistenceError::connection,
    )
}

impl From<MutableDrawingRow> for MutableDrawing {
    fn from(row: MutableDrawingRow) -> Self {
        Self {
            id: DrawingId::new(row.id),
            owner: UserId::new(row.owner_id),
            name: row.name,
            data: row.data,
            created_at: row.created_at,
        }
    }
}

impl From<MutableDrawingSummaryRow> for MutableDrawingSummary {
    fn from(row: MutableDrawingSummaryRow) -> Self {
        Self {
            id: DrawingId::new(row.id),
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl MutableDrawingRepository for DieselMutableDrawingRepository {
    async fn create(
        &self,
        drawing: &NewMutableDrawing,
    ) -> Result<DrawingId, MutableDrawingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewMutableDrawingRow {
            owner_id: drawing.owner.as_i64(),
            name: drawing.name.as_str(),
            data: drawing.data.as_str(),
        };

        diesel::insert_into(mutable_drawings::table)
            .values(&row)
            .returning(mutable_drawings::id)
            .get_result::<i64>(&mut conn)
            .await
            .map(DrawingId::new)
            .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        owner: UserId,
        id: DrawingId,
        changes: &DrawingChanges,
    ) -> Result<u64, MutableDrawingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = mutable_drawings::table.filter(
            mutable_drawings::id
                .eq(id.as_i64())
                .and(mutable_drawings::owner_id.eq(owner.as_i64())),
        );

        // An empty changeset is rejected by Diesel; a self-assignment still
        // reports whether the scoped row exists.
        let rows = if changes.is_empty() {
            diesel::update(target)
                .set(mutable_drawings::id.eq(mutable_drawings::id))
                .execute(&mut conn)
                .await
        } else {
            let changeset = MutableDrawingChangeset {
                name: changes.name(),
                data: changes.data(),
            };
            diesel::update(target)
                .set(&changeset)
                .execute(&mut conn)
                .await
        };

        rows.map(affected_rows).map_err(map_diesel_error)
    }

    async fn delete(
        &self,
        owner: UserId,
        id: DrawingId,
    ) -> Result<u64, MutableDrawingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(
            mutable_drawings::table.filter(
                mutable_drawings::id
                    .eq(id.as_i64())
                    .and(mutable_drawings::owner_id.eq(owner.as_i64())),
            ),
        )
        .execute(&mut conn)
        .await
        .map(affected_rows)
        .map_err(map_diesel_error)
    }

    async fn find(
        &self,
        owner: UserId,
        id: DrawingId,
    ) -> Result<Option<MutableDrawing>, MutableDrawingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        mutable_drawings::table
            .filter(
                mutable_drawings::id
                    .eq(id.as_i64())
                    .and(mutable_drawings::owner_id.eq(owner.as_i64())),
            )
            .select(MutableDrawingRow::as_select())
            .first::<MutableDrawingRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(MutableDrawing::from))
            .map_err(map_diesel_error)
    }

    async fn list(
        &self,
        owner: UserId,
        limit: i64,
    ) -> Result<Vec<MutableDrawingSummary>, MutableDrawingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<MutableDrawingSummaryRow> = mutable_drawings::table
            .filter(mutable_drawings::owner_id.eq(owner.as_i64()))
            .order((
                mutable_drawings::created_at.desc(),
                mutable_drawings::id.desc(),
            ))
            .limit(limit)
            .select(MutableDrawingSummaryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
