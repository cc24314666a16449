//! Tests for account API handlers.

use super::*;
use actix_web::cookie::Cookie;
use actix_web::{App, test as actix_test};
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::Value;

use crate::domain::ports::{
    MockAccountService, MockImmutableDrawingService, MockMutableDrawingService,
};
use crate::domain::{EmailAddress, RegistrationRejection, User};
use crate::inbound::http::session::SESSION_COOKIE_NAME;
use crate::inbound::http::test_utils::{resolving_accounts, state_from, test_key};

fn app_with(
    accounts: MockAccountService,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = state_from(
        accounts,
        MockImmutableDrawingService::new(),
        MockMutableDrawingService::new(),
    );
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api")
            .service(create_user)
            .service(current_user)
            .service(authenticate)
            .service(logout),
    )
}

fn credentials(email: &str, password: &str) -> CredentialsRequest {
    CredentialsRequest {
        email: email.into(),
        password: password.into(),
    }
}

async fn body_json(res: actix_web::dev::ServiceResponse) -> Value {
    let body = actix_test::read_body(res).await;
    serde_json::from_slice(&body).expect("json body")
}

#[actix_web::test]
async fn registration_returns_created_with_empty_error() {
    let mut accounts = MockAccountService::new();
    accounts
        .expect_register()
        .withf(|email, password| email == "a@test.com" && password == "12345")
        .times(1)
        .return_once(|_, _| Ok(RegistrationOutcome::Registered(UserId::new(1))));
    let app = actix_test::init_service(app_with(accounts)).await;

    let req = actix_test::TestRequest::post()
        .uri("/api/user")
        .set_json(credentials("a@test.com", "12345"))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(body_json(res).await, json!({ "error": "" }));
}

#[rstest]
#[case(RegistrationRejection::AlreadyExists, "User already exists")]
#[case(RegistrationRejection::InvalidEmail, "Invalid email")]
#[case(RegistrationRejection::PasswordTooShort, "Password too short")]
#[actix_web::test]
async fn registration_refusals_are_reported_with_ok(
    #[case] rejection: RegistrationRejection,
    #[case] reason: &str,
) {
    let mut accounts = MockAccountService::new();
    accounts
        .expect_register()
        .return_once(move |_, _| Ok(RegistrationOutcome::Rejected(rejection)));
    let app = actix_test::init_service(app_with(accounts)).await;

    let req = actix_test::TestRequest::post()
        .uri("/api/user")
        .set_json(credentials("a@test.com", "1234"))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, json!({ "error": reason }));
}

#[actix_web::test]
async fn successful_login_sets_session_cookie() {
    let mut accounts = MockAccountService::new();
    accounts
        .expect_login()
        .withf(|creds| creds.email() == "a@test.com" && creds.password() == "12345")
        .return_once(|_| Ok(Some(test_key())));
    let app = actix_test::init_service(app_with(accounts)).await;

    let req = actix_test::TestRequest::post()
        .uri("/api/user/auth")
        .set_json(credentials("a@test.com", "12345"))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::ACCEPTED);
    let cookie = res
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE_NAME)
        .expect("session cookie");
    assert_eq!(cookie.value(), test_key().as_str());
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(body_json(res).await, json!({ "error": "" }));
}

#[actix_web::test]
async fn rejected_login_sets_no_cookie() {
    let mut accounts = MockAccountService::new();
    accounts.expect_login().return_once(|_| Ok(None));
    let app = actix_test::init_service(app_with(accounts)).await;

    let req = actix_test::TestRequest::post()
        .uri("/api/user/auth")
        .set_json(credentials("a@test.com", "wrong"))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.response().cookies().next().is_none());
    assert_eq!(body_json(res).await, json!({ "error": LOGIN_FAILED_REASON }));
}

#[rstest]
#[case("", "12345", "email", "empty_email")]
#[case("a@test.com", "", "password", "empty_password")]
#[actix_web::test]
async fn empty_login_fields_are_invalid_requests(
    #[case] email: &str,
    #[case] password: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut accounts = MockAccountService::new();
    accounts.expect_login().never();
    let app = actix_test::init_service(app_with(accounts)).await;

    let req = actix_test::TestRequest::post()
        .uri("/api/user/auth")
        .set_json(credentials(email, password))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let value = body_json(res).await;
    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["details"]["field"], field);
    assert_eq!(value["details"]["code"], code);
}

#[actix_web::test]
async fn current_user_returns_profile() {
    let user = UserId::new(7);
    let mut accounts = resolving_accounts(user);
    accounts
        .expect_current_user()
        .with(eq(user))
        .return_once(move |id| {
            let email = EmailAddress::parse("a@test.com").expect("fixture email");
            Ok(Some(User::new(id, email)))
        });
    let app = actix_test::init_service(app_with(accounts)).await;

    let req = actix_test::TestRequest::get()
        .uri("/api/user")
        .cookie(Cookie::new(SESSION_COOKIE_NAME, test_key().as_str().to_owned()))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, json!({ "id": 7, "email": "a@test.com" }));
}

#[actix_web::test]
async fn current_user_requires_a_session() {
    let app = actix_test::init_service(app_with(resolving_accounts(UserId::new(7)))).await;

    let req = actix_test::TestRequest::get().uri("/api/user").to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(res).await["code"], "unauthorized");
}

#[actix_web::test]
async fn logout_revokes_sessions_and_clears_cookie() {
    let user = UserId::new(7);
    let mut accounts = resolving_accounts(user);
    accounts
        .expect_logout()
        .with(eq(user))
        .times(1)
        .return_once(|_| Ok(()));
    let app = actix_test::init_service(app_with(accounts)).await;

    let req = actix_test::TestRequest::post()
        .uri("/api/user/logout")
        .cookie(Cookie::new(SESSION_COOKIE_NAME, test_key().as_str().to_owned()))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let cookie = res
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE_NAME)
        .expect("removal cookie");
    assert_eq!(cookie.value(), "");
}

#[actix_web::test]
async fn storage_failures_surface_as_redacted_errors() {
    let mut accounts = MockAccountService::new();
    accounts
        .expect_register()
        .return_once(|_, _| Err(Error::service_unavailable("pool exhausted")));
    let app = actix_test::init_service(app_with(accounts)).await;

    let req = actix_test::TestRequest::post()
        .uri("/api/user")
        .set_json(credentials("a@test.com", "12345"))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(res).await["message"], "Service unavailable");
}
