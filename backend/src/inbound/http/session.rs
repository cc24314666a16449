//! Session cookie handling and the authenticated-caller extractor.
//!
//! The cookie carries only the opaque session key; the caller's identity is
//! always resolved server-side through the account service.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{Error, SessionKey, UserId};
use crate::inbound::http::state::HttpState;

/// Cookie name carrying the session key.
pub const SESSION_COOKIE_NAME: &str = "sessionKey";

/// Lifetime of an issued session cookie.
pub const SESSION_COOKIE_MAX_AGE: Duration = Duration::days(365);

/// Cookie attributes shared by issue and expiry responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCookieConfig {
    secure: bool,
}

impl SessionCookieConfig {
    pub const fn new(secure: bool) -> Self {
        Self { secure }
    }

    pub const fn secure(&self) -> bool {
        self.secure
    }

    /// Cookie handing `key` to the client.
    pub fn issue(&self, key: &SessionKey) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE_NAME, key.as_str().to_owned())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(SESSION_COOKIE_MAX_AGE)
            .finish()
    }

    /// Already-expired cookie that clears the client's session key.
    pub fn expire(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE_NAME, "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .finish();
        cookie.make_removal();
        cookie
    }
}

impl Default for SessionCookieConfig {
    fn default() -> Self {
        Self::new(true)
    }
}

fn login_required() -> Error {
    Error::unauthorized("login required")
}

/// Caller identity resolved from the `sessionKey` cookie.
///
/// Missing, malformed, unknown and revoked keys all reject with the same
/// `401 Unauthorized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    pub fn id(&self) -> UserId {
        self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let raw_key = req
            .cookie(SESSION_COOKIE_NAME)
            .map(|cookie| cookie.value().to_owned());

        Box::pin(async move {
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let Some(raw_key) = raw_key else {
                return Err(login_required());
            };
            let key = SessionKey::new(raw_key).map_err(|err| {
                debug!(error = %err, "rejecting malformed session key");
                login_required()
            })?;
            state
                .accounts
                .resolve_session(&key)
                .await?
                .map(AuthenticatedUser)
                .ok_or_else(login_required)
        })
    }
}
