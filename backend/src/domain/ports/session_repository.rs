//! Port for server-side session storage.

use async_trait::async_trait;

use crate::domain::{SessionKey, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session repository adapters.
    pub enum SessionPersistenceError {
        /// Repository connection could not be established.
        Connection => "session repository connection failed",
        /// Query or mutation failed during execution.
        Query => "session repository query failed",
    }
}

/// Session rows keyed by token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Bind `key` to `user_id`.
    async fn insert(&self, key: &SessionKey, user_id: UserId)
    -> Result<(), SessionPersistenceError>;

    /// Owner of `key`, if the session exists.
    async fn find_user_id(&self, key: &SessionKey)
    -> Result<Option<UserId>, SessionPersistenceError>;

    /// Remove every session of `user_id`, returning how many were removed.
    async fn delete_for_user(&self, user_id: UserId) -> Result<u64, SessionPersistenceError>;
}
