//! User identity and account primitives.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors for account fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The email is not a single bare mailbox address.
    InvalidEmail,
    /// The password is shorter than the configured minimum.
    PasswordTooShort { min: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email must be a single valid mailbox address"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Database-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier for persistence adapters.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Minimum accepted password length, in characters.
pub const PASSWORD_MIN_LENGTH: usize = 5;

/// Longest accepted mailbox, in characters (RFC 5321 path limit less the
/// angle brackets). Fits the `users.email` column.
pub const EMAIL_MAX_LENGTH: usize = 254;

static MAILBOX_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn mailbox_regex() -> Option<&'static Regex> {
    MAILBOX_RE
        .get_or_init(|| {
            // dot-atom "@" dot-atom; atext also admits UTF-8 beyond ASCII.
            let atext = r"[A-Za-z0-9!#$%&'*+/=?^_`{|}~\-\x{80}-\x{10FFFF}]";
            let dot_atom = format!(r"{atext}+(?:\.{atext}+)*");
            Regex::new(&format!("^{dot_atom}@{dot_atom}$")).ok()
        })
        .as_ref()
}

/// Email address accepted for registration.
///
/// ## Invariants
/// - The value is a bare `local@domain` mailbox: no display name, comments,
///   angle brackets or surrounding whitespace. Parsing the input as an
///   address must yield the input verbatim.
/// - At most [`EMAIL_MAX_LENGTH`] characters.
///
/// # Examples
/// ```
/// use cascii::domain::EmailAddress;
///
/// assert!(EmailAddress::parse("a@test.com").is_ok());
/// assert!(EmailAddress::parse("Ada <a@test.com>").is_err());
/// assert!(EmailAddress::parse("testtest.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate `raw` as a bare mailbox address.
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        if raw.chars().count() > EMAIL_MAX_LENGTH {
            return Err(UserValidationError::InvalidEmail);
        }
        if mailbox_regex().is_some_and(|re| re.is_match(raw)) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(UserValidationError::InvalidEmail)
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Registered user as seen by the rest of the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = i64, example = 1)]
    id: UserId,
    #[schema(value_type = String, example = "a@test.com")]
    email: EmailAddress,
}

impl User {
    /// Build a user from validated parts.
    #[must_use]
    pub fn new(id: UserId, email: EmailAddress) -> Self {
        Self { id, email }
    }

    /// Stable user identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Registered email address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a@test.com")]
    #[case("first.last@example.org")]
    #[case("user+tag@sub.example.co")]
    #[case("a@localhost")]
    fn accepts_bare_mailboxes(#[case] raw: &str) {
        let email = EmailAddress::parse(raw).expect("valid mailbox");
        assert_eq!(email.as_ref(), raw);
    }

    #[rstest]
    #[case("testtest.com")]
    #[case("")]
    #[case(" a@test.com")]
    #[case("a@test.com ")]
    #[case("Ada <a@test.com>")]
    #[case("<a@test.com>")]
    #[case("a@@test.com")]
    #[case("a.@test.com")]
    #[case("a@test..com")]
    #[case("a@test.com, b@test.com")]
    fn rejects_anything_but_a_single_verbatim_mailbox(#[case] raw: &str) {
        assert_eq!(
            EmailAddress::parse(raw),
            Err(UserValidationError::InvalidEmail)
        );
    }

    /// `a…a@test.com` padded to exactly `length` characters.
    fn mailbox_of_length(length: usize) -> String {
        let domain = "@test.com";
        format!("{}{domain}", "a".repeat(length - domain.len()))
    }

    #[rstest]
    #[case(EMAIL_MAX_LENGTH, true)]
    #[case(EMAIL_MAX_LENGTH + 1, false)]
    #[case(300, false)]
    fn mailbox_length_is_bounded(#[case] length: usize, #[case] accepted: bool) {
        let raw = mailbox_of_length(length);
        assert_eq!(raw.chars().count(), length);
        assert_eq!(EmailAddress::parse(&raw).is_ok(), accepted);
    }

    #[rstest]
    fn user_id_serialises_as_integer() {
        let value = serde_json::to_value(UserId::new(42)).expect("serialise id");
        assert_eq!(value, serde_json::json!(42));
    }
}
