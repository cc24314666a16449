//! PostgreSQL-backed `SessionRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SessionPersistenceError, SessionRepository};
use crate::domain::{SessionKey, UserId};

use super::diesel_basic_error_mapping::{
    affected_rows, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::NewSessionRow;
use super::pool::{DbPool, PoolError};
use super::schema::sessions;

/// Diesel-backed implementation of the session repository port.
#[derive(Clone)]
pub struct DieselSessionRepository {
    pool: DbPool,
}

impl DieselSessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SessionPersistenceError {
    map_basic_pool_error(error, SessionPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SessionPersistenceError {
    map_basic_diesel_error(
        error,
        SessionPersistenceError::query,
        SessionPersistenceError::connection,
    )
}

#[async_trait]
impl SessionRepository for DieselSessionRepository {
    async fn insert(
        &self,
        key: &SessionKey,
        user_id: UserId,
    ) -> Result<(), SessionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewSessionRow {
            session_key: key.as_str(),
            user_id: user_id.as_i64(),
        };

        diesel::insert_into(sessions::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_user_id(
        &self,
        key: &SessionKey,
    ) -> Result<Option<UserId>, SessionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let user_id = sessions::table
            .filter(sessions::session_key.eq(key.as_str()))
            .select(sessions::user_id)
            .first::<i64>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(user_id.map(UserId::new))
    }

    async fn delete_for_user(&self, user_id: UserId) -> Result<u64, SessionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(sessions::table.filter(sessions::user_id.eq(user_id.as_i64())))
            .execute(&mut conn)
            .await
            .map(affected_rows)
            .map_err(map_diesel_error)
    }
}
