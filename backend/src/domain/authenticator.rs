//! Credential checks and registration rules.

use std::sync::Arc;

use tracing::debug;

use super::auth::{
    LoginCredentials, RegistrationOutcome, RegistrationRejection, validate_password,
};
use super::ports::{
    NewUser, PasswordHash, PasswordHashError, PasswordHasher, UserInsertOutcome,
    UserPersistenceError, UserRepository,
};
use super::user::{EmailAddress, UserId};

/// Password hashed at construction and verified against when an email is
/// unknown, so both login failure paths run one verification.
const DECOY_PASSWORD: &str = "decoy-password-never-matches";

/// Failures while registering an account.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Storage(#[from] UserPersistenceError),
    #[error(transparent)]
    Hashing(#[from] PasswordHashError),
}

/// Validates credentials against stored user records.
pub struct Authenticator<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
    decoy: PasswordHash,
}

impl<U, H> Authenticator<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    /// Build an authenticator. Fails only if the hasher cannot hash.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Result<Self, PasswordHashError> {
        let decoy = hasher.hash(DECOY_PASSWORD)?;
        Ok(Self {
            users,
            hasher,
            decoy,
        })
    }

    /// Id of the user the credentials belong to.
    ///
    /// Unknown email and wrong password both return `None`.
    pub async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<UserId>, UserPersistenceError> {
        let stored = self
            .users
            .find_credentials_by_email(credentials.email())
            .await?;

        let Some(stored) = stored else {
            let _ = self.hasher.verify(credentials.password(), &self.decoy);
            return Ok(None);
        };

        if self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
        {
            Ok(Some(stored.user_id))
        } else {
            Ok(None)
        }
    }

    /// Create an account after checking, in order: the email is free, the
    /// email is a bare mailbox, the password is long enough.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
    ) -> Result<RegistrationOutcome, RegistrationError> {
        if self.users.find_credentials_by_email(email).await?.is_some() {
            return Ok(RegistrationOutcome::Rejected(
                RegistrationRejection::AlreadyExists,
            ));
        }
        let email = match EmailAddress::parse(email) {
            Ok(email) => email,
            Err(err) => return Ok(RegistrationOutcome::Rejected(err.into())),
        };
        if let Err(err) = validate_password(password) {
            return Ok(RegistrationOutcome::Rejected(err.into()));
        }

        let new_user = NewUser {
            email,
            password_hash: self.hasher.hash(password)?,
        };
        match self.users.insert(&new_user).await? {
            UserInsertOutcome::Inserted(id) => {
                debug!(user_id = %id, "account registered");
                Ok(RegistrationOutcome::Registered(id))
            }
            UserInsertOutcome::EmailTaken => Ok(RegistrationOutcome::Rejected(
                RegistrationRejection::AlreadyExists,
            )),
        }
    }
}
