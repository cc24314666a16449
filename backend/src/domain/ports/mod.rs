//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod immutable_drawing_repository;
mod immutable_drawing_service;
mod mutable_drawing_repository;
mod mutable_drawing_service;
mod password_hasher;
mod session_key_generator;
mod session_repository;
mod user_repository;

#[cfg(test)]
pub use account_service::MockAccountService;
pub use account_service::AccountService;
#[cfg(test)]
pub use immutable_drawing_repository::MockImmutableDrawingRepository;
pub use immutable_drawing_repository::{
    ImmutableDrawingPersistenceError, ImmutableDrawingRepository, ShortKeyInsertOutcome,
};
#[cfg(test)]
pub use immutable_drawing_service::MockImmutableDrawingService;
pub use immutable_drawing_service::ImmutableDrawingService;
#[cfg(test)]
pub use mutable_drawing_repository::MockMutableDrawingRepository;
pub use mutable_drawing_repository::{MutableDrawingPersistenceError, MutableDrawingRepository};
#[cfg(test)]
pub use mutable_drawing_service::MockMutableDrawingService;
pub use mutable_drawing_service::MutableDrawingService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHash, PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use session_key_generator::MockSessionKeyGenerator;
pub use session_key_generator::SessionKeyGenerator;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
pub use session_repository::{SessionPersistenceError, SessionRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{
    NewUser, StoredCredentials, UserInsertOutcome, UserPersistenceError, UserRepository,
};
