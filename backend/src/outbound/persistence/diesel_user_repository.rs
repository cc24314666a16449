//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    NewUser, PasswordHash, StoredCredentials, UserInsertOutcome, UserPersistenceError,
    UserRepository,
};
use crate::domain::{EmailAddress, User, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation_of, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserCredentialsRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Unique constraint on `users.email`.
const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let email = EmailAddress::parse(&row.email)
        .map_err(|err| UserPersistenceError::query(format!("stored email is invalid: {err}")))?;
    Ok(User::new(UserId::new(row.id), email))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<UserInsertOutcome, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            email: user.email.as_ref(),
            password_hash: user.password_hash.as_str(),
        };

        let result = diesel::insert_into(users::table)
            .values(&row)
            .returning(users::id)
            .get_result::<i64>(&mut conn)
            .await;

        match result {
            Ok(id) => Ok(UserInsertOutcome::Inserted(UserId::new(id))),
            Err(err) if is_unique_violation_of(&err, EMAIL_UNIQUE_CONSTRAINT) => {
                Ok(UserInsertOutcome::EmailTaken)
            }
            Err(err) => Err(map_diesel_error(err)),
        }
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::email.eq(email))
            .select(UserCredentialsRow::as_select())
            .first::<UserCredentialsRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(|row| StoredCredentials {
            user_id: UserId::new(row.id),
            password_hash: PasswordHash::new(row.password_hash),
        }))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(id.as_i64()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(err, UserPersistenceError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn corrupt_stored_email_is_a_query_error() {
        let err = row_to_user(UserRow {
            id: 1,
            email: "not-an-address".to_owned(),
        })
        .expect_err("invalid email");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn valid_row_converts() {
        let user = row_to_user(UserRow {
            id: 4,
            email: "a@test.com".to_owned(),
        })
        .expect("user");
        assert_eq!(user.id(), UserId::new(4));
        assert_eq!(user.email().as_ref(), "a@test.com");
    }
}
