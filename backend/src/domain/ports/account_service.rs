//! Driving port for account and session use-cases.
//!
//! Inbound adapters call it to register, sign in and resolve callers without
//! knowing the backing infrastructure.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, RegistrationOutcome, SessionKey, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account. Refusals are reported through the outcome.
    async fn register(&self, email: &str, password: &str)
    -> Result<RegistrationOutcome, Error>;

    /// Check credentials and open a session. `None` covers both an unknown
    /// email and a wrong password.
    async fn login(&self, credentials: &LoginCredentials) -> Result<Option<SessionKey>, Error>;

    /// Revoke every session held by `caller`.
    async fn logout(&self, caller: UserId) -> Result<(), Error>;

    /// Profile of the signed-in user.
    async fn current_user(&self, caller: UserId) -> Result<Option<User>, Error>;

    /// Identity bound to a presented session key.
    async fn resolve_session(&self, key: &SessionKey) -> Result<Option<UserId>, Error>;
}
