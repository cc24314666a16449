//! Domain primitives, components and services.
//!
//! Purpose: Define the drawing store's core independent of transport and
//! storage. Outbound adapters implement the traits in [`ports`]; inbound
//! adapters drive the services through the driving ports.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - KeyResolver: shortest unique digest prefix for new content.
//! - SessionStore / Authenticator: session and credential handling.
//! - SessionAccountService, PublishedDrawingService, OwnedDrawingService:
//!   driving port implementations.

pub mod ports;

mod account_service;
mod auth;
mod authenticator;
mod content_digest;
pub mod error;
mod immutable_drawing;
mod immutable_drawing_service;
mod key_resolver;
mod mutable_drawing;
mod mutable_drawing_service;
mod session;
mod session_store;
mod trace_id;
mod user;

pub use self::account_service::SessionAccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, RegistrationOutcome, RegistrationRejection,
    validate_password,
};
pub use self::authenticator::{Authenticator, RegistrationError};
pub use self::content_digest::{
    CONTENT_DIGEST_LENGTH, ContentDigest, ContentDigestError, ContentHasher, Sha512Hasher,
};
pub use self::error::{Error, ErrorCode};
pub use self::immutable_drawing::{
    DrawingPayload, DrawingValidationError, ImmutableDrawing, NewImmutableDrawing, ShortKey,
};
pub use self::immutable_drawing_service::PublishedDrawingService;
pub use self::key_resolver::{
    DEFAULT_SHORT_KEY_MAX_LENGTH, DEFAULT_SHORT_KEY_MIN_LENGTH, KeyLengthPolicy,
    KeyLengthPolicyError, KeyResolutionError, KeyResolver,
};
pub use self::mutable_drawing::{
    DRAWING_NAME_MAX_LENGTH, DrawingChanges, DrawingId, DrawingName, MUTABLE_DRAWING_PAGE_SIZE,
    MutableDrawing, MutableDrawingSummary, NewMutableDrawing,
};
pub use self::mutable_drawing_service::OwnedDrawingService;
pub use self::session::{SESSION_KEY_MAX_LENGTH, SessionKey, SessionKeyError};
pub use self::session_store::SessionStore;
pub use self::trace_id::TraceId;
pub use self::user::{
    EMAIL_MAX_LENGTH, EmailAddress, PASSWORD_MIN_LENGTH, User, UserId, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use cascii::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such drawing"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
