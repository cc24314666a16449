//! cascii backend: publish ASCII drawings under short content-derived keys
//! and keep private, editable drawings behind a session cookie.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use middleware::Trace;
/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
