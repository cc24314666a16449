//! Authentication primitives: login credentials and registration outcomes.
//!
//! Inbound adapters build these from raw request fields before talking to
//! the account service, keeping payload parsing out of the domain services.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{PASSWORD_MIN_LENGTH, UserId, UserValidationError};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Credentials presented by a caller.
///
/// ## Invariants
/// - `email` is non-empty. It is kept verbatim because lookups are exact.
/// - `password` is non-empty and zeroed on drop.
///
/// # Examples
/// ```
/// use cascii::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("a@test.com", "12345").expect("credentials");
/// assert_eq!(creds.email(), "a@test.com");
/// assert_eq!(creds.password(), "12345");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        if email.trim().is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the user lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Check a registration password against the length policy.
///
/// Length is counted in Unicode scalar values, not bytes: `"éééé"` is four
/// characters (eight bytes) and is refused.
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(UserValidationError::PasswordTooShort {
            min: PASSWORD_MIN_LENGTH,
        });
    }
    Ok(())
}

/// User-facing reasons a registration is refused.
///
/// These are ordinary outcomes, not failures: they are reported to the
/// caller and never logged as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationRejection {
    /// Password shorter than [`PASSWORD_MIN_LENGTH`].
    PasswordTooShort,
    /// Email is not a single verbatim mailbox address.
    InvalidEmail,
    /// An account with this email already exists.
    AlreadyExists,
}

impl RegistrationRejection {
    /// Reason string shown to the caller.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::PasswordTooShort => "Password too short",
            Self::InvalidEmail => "Invalid email",
            Self::AlreadyExists => "User already exists",
        }
    }
}

impl fmt::Display for RegistrationRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

impl From<UserValidationError> for RegistrationRejection {
    fn from(value: UserValidationError) -> Self {
        match value {
            UserValidationError::InvalidEmail => Self::InvalidEmail,
            UserValidationError::PasswordTooShort { .. } => Self::PasswordTooShort,
        }
    }
}

/// Result of a registration attempt that reached a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The account was created.
    Registered(UserId),
    /// The request was refused for a user-facing reason.
    Rejected(RegistrationRejection),
}
