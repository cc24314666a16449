//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{
    MockAccountService, MockImmutableDrawingService, MockMutableDrawingService,
};
use crate::domain::{SessionKey, UserId};
use crate::inbound::http::session::SessionCookieConfig;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Session key the mocked account service recognises.
pub fn test_key() -> SessionKey {
    SessionKey::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("fixture key")
}

/// Account service mock resolving [`test_key`] to `user`.
pub fn resolving_accounts(user: UserId) -> MockAccountService {
    let mut accounts = MockAccountService::new();
    accounts
        .expect_resolve_session()
        .returning(move |key| Ok((key == &test_key()).then_some(user)));
    accounts
}

/// Assemble state from mocks with non-secure cookies for plain HTTP tests.
pub fn state_from(
    accounts: MockAccountService,
    immutable_drawings: MockImmutableDrawingService,
    mutable_drawings: MockMutableDrawingService,
) -> HttpState {
    HttpState::new(
        HttpStatePorts {
            accounts: Arc::new(accounts),
            immutable_drawings: Arc::new(immutable_drawings),
            mutable_drawings: Arc::new(mutable_drawings),
        },
        SessionCookieConfig::new(false),
    )
}

/// State whose only behaviour is resolving [`test_key`] to `user`.
pub fn signed_in_state(user: UserId) -> HttpState {
    state_from(
        resolving_accounts(user),
        MockImmutableDrawingService::new(),
        MockMutableDrawingService::new(),
    )
}
