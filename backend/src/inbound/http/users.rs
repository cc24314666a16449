//! Account API handlers.
//!
//! ```text
//! POST /api/user         {"email":"a@test.com","password":"12345"}
//! GET  /api/user
//! POST /api/user/auth    {"email":"a@test.com","password":"12345"}
//! POST /api/user/logout
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, RegistrationOutcome, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Reason returned when credentials do not match an account.
pub const LOGIN_FAILED_REASON: &str = "User not found";

/// Email and password pair used by registration and login.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    #[schema(example = "a@test.com")]
    pub email: String,
    #[schema(example = "12345")]
    pub password: String,
}

/// Outcome envelope: `error` is empty on success, otherwise a reason.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct OutcomeResponse {
    pub error: String,
}

impl OutcomeResponse {
    pub fn ok() -> Self {
        Self {
            error: String::new(),
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            error: reason.into(),
        }
    }
}

/// Profile of the signed-in user.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(value_type = i64, example = 1)]
    pub id: UserId,
    pub email: String,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Register an account.
///
/// Refusals (`User already exists`, `Invalid email`, `Password too short`)
/// are ordinary outcomes reported with `200 OK`.
#[utoipa::path(
    post,
    path = "/api/user",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = OutcomeResponse),
        (status = 200, description = "Registration refused", body = OutcomeResponse),
        (status = 400, description = "Malformed body", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security([])
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let CredentialsRequest { email, password } = payload.into_inner();
    let outcome = state.accounts.register(&email, &password).await?;
    Ok(match outcome {
        RegistrationOutcome::Registered(_) => {
            HttpResponse::Created().json(OutcomeResponse::ok())
        }
        RegistrationOutcome::Rejected(rejection) => {
            HttpResponse::Ok().json(OutcomeResponse::rejected(rejection.reason()))
        }
    })
}

/// Return the signed-in user's profile.
#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/user")]
pub async fn current_user(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state
        .accounts
        .current_user(caller.id())
        .await?
        .ok_or_else(|| Error::unauthorized("login required"))?;
    Ok(web::Json(UserResponse {
        id: user.id(),
        email: user.email().to_string(),
    }))
}

/// Check credentials and issue a `sessionKey` cookie.
#[utoipa::path(
    post,
    path = "/api/user/auth",
    request_body = CredentialsRequest,
    responses(
        (status = 202, description = "Signed in", body = OutcomeResponse,
            headers(("Set-Cookie" = String, description = "sessionKey cookie"))),
        (status = 200, description = "Credentials rejected", body = OutcomeResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "authUser",
    security([])
)]
#[post("/user/auth")]
pub async fn authenticate(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let CredentialsRequest { email, password } = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&email, &password).map_err(map_login_validation_error)?;

    match state.accounts.login(&credentials).await? {
        Some(key) => Ok(HttpResponse::build(StatusCode::ACCEPTED)
            .cookie(state.cookies.issue(&key))
            .json(OutcomeResponse::ok())),
        None => Ok(HttpResponse::Ok().json(OutcomeResponse::rejected(LOGIN_FAILED_REASON))),
    }
}

/// Revoke every session of the caller and clear the cookie.
#[utoipa::path(
    post,
    path = "/api/user/logout",
    responses(
        (status = 200, description = "Signed out", body = OutcomeResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "logoutUser"
)]
#[post("/user/logout")]
pub async fn logout(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    state.accounts.logout(caller.id()).await?;
    Ok(HttpResponse::Ok()
        .cookie(state.cookies.expire())
        .json(OutcomeResponse::ok()))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
