//! Server-side session issuance, resolution and revocation.

use std::sync::Arc;

use tracing::debug;

use super::ports::{SessionKeyGenerator, SessionPersistenceError, SessionRepository};
use super::session::SessionKey;
use super::user::UserId;

/// Binds opaque tokens to user identities through persistent storage.
///
/// Sessions do not expire. Revocation removes every session of a user at
/// once.
pub struct SessionStore<S, G> {
    sessions: Arc<S>,
    keys: Arc<G>,
}

impl<S, G> Clone for SessionStore<S, G> {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
            keys: Arc::clone(&self.keys),
        }
    }
}

impl<S, G> SessionStore<S, G>
where
    S: SessionRepository,
    G: SessionKeyGenerator,
{
    pub fn new(sessions: Arc<S>, keys: Arc<G>) -> Self {
        Self { sessions, keys }
    }

    /// Issue a new session for `user_id`. Storage failures are not retried.
    pub async fn create(&self, user_id: UserId) -> Result<SessionKey, SessionPersistenceError> {
        let key = self.keys.generate();
        self.sessions.insert(&key, user_id).await?;
        debug!(%user_id, "session issued");
        Ok(key)
    }

    /// User bound to `key`. An unknown key is `None`, not an error.
    pub async fn resolve(&self, key: &SessionKey) -> Result<Option<UserId>, SessionPersistenceError> {
        self.sessions.find_user_id(key).await
    }

    /// Revoke every session of `user_id`. Idempotent.
    pub async fn invalidate(&self, user_id: UserId) -> Result<u64, SessionPersistenceError> {
        let removed = self.sessions.delete_for_user(user_id).await?;
        debug!(%user_id, removed, "sessions revoked");
        Ok(removed)
    }
}
