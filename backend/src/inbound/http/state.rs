//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` so they depend only on
//! driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountService, ImmutableDrawingService, MutableDrawingService};
use crate::inbound::http::session::SessionCookieConfig;

/// Parameter object bundling the driving ports used by handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountService>,
    pub immutable_drawings: Arc<dyn ImmutableDrawingService>,
    pub mutable_drawings: Arc<dyn MutableDrawingService>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub immutable_drawings: Arc<dyn ImmutableDrawingService>,
    pub mutable_drawings: Arc<dyn MutableDrawingService>,
    pub cookies: SessionCookieConfig,
}

impl HttpState {
    /// Construct state from port implementations and cookie settings.
    pub fn new(ports: HttpStatePorts, cookies: SessionCookieConfig) -> Self {
        let HttpStatePorts {
            accounts,
            immutable_drawings,
            mutable_drawings,
        } = ports;
        Self {
            accounts,
            immutable_drawings,
            mutable_drawings,
            cookies,
        }
    }
}
