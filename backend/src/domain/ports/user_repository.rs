//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserId};

use super::define_port_error;
use super::password_hasher::PasswordHash;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection => "user repository connection failed",
        /// Query or mutation failed during execution.
        Query => "user repository query failed",
    }
}

/// Account row to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
}

/// Identifier and stored hash looked up at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub user_id: UserId,
    pub password_hash: PasswordHash,
}

/// Outcome of an insert guarded by the unique email constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserInsertOutcome {
    /// Row written with the returned identifier.
    Inserted(UserId),
    /// Another account already owns the email.
    EmailTaken,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. A duplicate email is an outcome, not an error.
    async fn insert(&self, user: &NewUser) -> Result<UserInsertOutcome, UserPersistenceError>;

    /// Fetch credentials by exact email match.
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;
}
