//! Builders wiring repositories and security adapters into HTTP state.

use std::sync::Arc;

use crate::domain::ports::{
    ImmutableDrawingRepository, MutableDrawingRepository, PasswordHashError, SessionRepository,
    UserRepository,
};
use crate::domain::{
    KeyLengthPolicy, OwnedDrawingService, PublishedDrawingService, SessionAccountService,
    Sha512Hasher,
};
use crate::inbound::http::session::SessionCookieConfig;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::persistence::{
    DbPool, DieselImmutableDrawingRepository, DieselMutableDrawingRepository,
    DieselSessionRepository, DieselUserRepository,
};
use crate::outbound::security::{Sha512PasswordHasher, UuidSessionKeyGenerator};

/// Driven adapters the services are assembled from.
pub struct Repositories<U, S, I, M> {
    pub users: Arc<U>,
    pub sessions: Arc<S>,
    pub immutable_drawings: Arc<I>,
    pub mutable_drawings: Arc<M>,
}

impl
    Repositories<
        DieselUserRepository,
        DieselSessionRepository,
        DieselImmutableDrawingRepository,
        DieselMutableDrawingRepository,
    >
{
    /// Postgres-backed repositories sharing one pool.
    pub fn diesel(pool: &DbPool) -> Self {
        Self {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            sessions: Arc::new(DieselSessionRepository::new(pool.clone())),
            immutable_drawings: Arc::new(DieselImmutableDrawingRepository::new(pool.clone())),
            mutable_drawings: Arc::new(DieselMutableDrawingRepository::new(pool.clone())),
        }
    }
}

/// Build HTTP state from repositories, using the production hashers and
/// session key generator.
///
/// # Errors
/// Fails when the login decoy hash cannot be computed.
pub fn build_http_state<U, S, I, M>(
    repositories: Repositories<U, S, I, M>,
    key_lengths: KeyLengthPolicy,
    cookies: SessionCookieConfig,
) -> Result<HttpState, PasswordHashError>
where
    U: UserRepository + 'static,
    S: SessionRepository + 'static,
    I: ImmutableDrawingRepository + 'static,
    M: MutableDrawingRepository + 'static,
{
    let Repositories {
        users,
        sessions,
        immutable_drawings,
        mutable_drawings,
    } = repositories;

    let accounts = SessionAccountService::new(
        users,
        sessions,
        Arc::new(Sha512PasswordHasher),
        Arc::new(UuidSessionKeyGenerator),
    )?;

    Ok(HttpState::new(
        HttpStatePorts {
            accounts: Arc::new(accounts),
            immutable_drawings: Arc::new(PublishedDrawingService::new(
                immutable_drawings,
                Sha512Hasher,
                key_lengths,
            )),
            mutable_drawings: Arc::new(OwnedDrawingService::new(mutable_drawings)),
        },
        cookies,
    ))
}
