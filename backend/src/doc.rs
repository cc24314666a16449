//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer (accounts,
//! drawings, health) together with the shared error schema and the
//! `sessionKey` cookie security scheme.
//!
//! The generated document backs Swagger UI in debug builds and is printed by
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::immutable_drawings::{
    PublishDrawingRequest, PublishedDrawingResponse, ShortKeyResponse,
};
use crate::inbound::http::mutable_drawings::{
    CreateDrawingRequest, CreatedDrawingResponse, DrawingListResponse, DrawingResponse,
    DrawingSummaryResponse, UpdateDrawingRequest,
};
use crate::inbound::http::session::SESSION_COOKIE_NAME;
use crate::inbound::http::users::{CredentialsRequest, OutcomeResponse, UserResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Session cookie issued by POST /api/user/auth.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "cascii API",
        description = "Publish ASCII drawings under short keys and keep private, editable drawings."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::authenticate,
        crate::inbound::http::users::logout,
        crate::inbound::http::immutable_drawings::publish_drawing,
        crate::inbound::http::immutable_drawings::get_published_drawing,
        crate::inbound::http::mutable_drawings::create_drawing,
        crate::inbound::http::mutable_drawings::list_drawings,
        crate::inbound::http::mutable_drawings::get_drawing,
        crate::inbound::http::mutable_drawings::update_drawing,
        crate::inbound::http::mutable_drawings::delete_drawing,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        CredentialsRequest,
        OutcomeResponse,
        UserResponse,
        PublishDrawingRequest,
        ShortKeyResponse,
        PublishedDrawingResponse,
        CreateDrawingRequest,
        UpdateDrawingRequest,
        CreatedDrawingResponse,
        DrawingResponse,
        DrawingSummaryResponse,
        DrawingListResponse
    )),
    tags(
        (name = "users", description = "Registration, sign-in and sessions"),
        (name = "drawings", description = "Published and owned drawings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
