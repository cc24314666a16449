//! Account domain service: registration, login and session resolution.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::Error;
use super::auth::{LoginCredentials, RegistrationOutcome};
use super::authenticator::{Authenticator, RegistrationError};
use super::ports::{
    AccountService, PasswordHashError, PasswordHasher, SessionKeyGenerator,
    SessionPersistenceError, SessionRepository, UserPersistenceError, UserRepository,
};
use super::session::SessionKey;
use super::session_store::SessionStore;
use super::user::{User, UserId};

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_session_error(error: SessionPersistenceError) -> Error {
    match error {
        SessionPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("session repository unavailable: {message}"))
        }
        SessionPersistenceError::Query { message } => {
            Error::internal(format!("session repository error: {message}"))
        }
    }
}

fn map_registration_error(error: RegistrationError) -> Error {
    match error {
        RegistrationError::Storage(err) => map_user_error(err),
        RegistrationError::Hashing(err) => Error::internal(err.to_string()),
    }
}

/// Account service backed by user and session repositories.
pub struct SessionAccountService<U, S, H, G> {
    users: Arc<U>,
    authenticator: Authenticator<U, H>,
    sessions: SessionStore<S, G>,
}

impl<U, S, H, G> SessionAccountService<U, S, H, G>
where
    U: UserRepository,
    S: SessionRepository,
    H: PasswordHasher,
    G: SessionKeyGenerator,
{
    /// Wire the service. Fails only if the password hasher is unusable.
    pub fn new(
        users: Arc<U>,
        sessions: Arc<S>,
        hasher: Arc<H>,
        keys: Arc<G>,
    ) -> Result<Self, PasswordHashError> {
        Ok(Self {
            authenticator: Authenticator::new(Arc::clone(&users), hasher)?,
            users,
            sessions: SessionStore::new(sessions, keys),
        })
    }
}

#[async_trait]
impl<U, S, H, G> AccountService for SessionAccountService<U, S, H, G>
where
    U: UserRepository,
    S: SessionRepository,
    H: PasswordHasher,
    G: SessionKeyGenerator,
{
    async fn register(&self, email: &str, password: &str) -> Result<RegistrationOutcome, Error> {
        self.authenticator
            .register(email, password)
            .await
            .map_err(map_registration_error)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<Option<SessionKey>, Error> {
        let Some(user_id) = self
            .authenticator
            .authenticate(credentials)
            .await
            .map_err(map_user_error)?
        else {
            return Ok(None);
        };
        let key = self
            .sessions
            .create(user_id)
            .await
            .map_err(map_session_error)?;
        info!(%user_id, "user signed in");
        Ok(Some(key))
    }

    async fn logout(&self, caller: UserId) -> Result<(), Error> {
        self.sessions
            .invalidate(caller)
            .await
            .map_err(map_session_error)?;
        info!(user_id = %caller, "user signed out");
        Ok(())
    }

    async fn current_user(&self, caller: UserId) -> Result<Option<User>, Error> {
        self.users.find_by_id(caller).await.map_err(map_user_error)
    }

    async fn resolve_session(&self, key: &SessionKey) -> Result<Option<UserId>, Error> {
        self.sessions.resolve(key).await.map_err(map_session_error)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
