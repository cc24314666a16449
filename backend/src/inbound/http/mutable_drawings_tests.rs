//! Tests for owned drawing handlers.

use super::*;
use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use chrono::TimeZone;
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::ports::{MockImmutableDrawingService, MockMutableDrawingService};
use crate::inbound::http::session::SESSION_COOKIE_NAME;
use crate::inbound::http::test_utils::{resolving_accounts, state_from, test_key};
use crate::inbound::http::validation::json_error_handler;

const CALLER: UserId = UserId::new(3);

fn fixture_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("fixture timestamp")
}

fn signed_in(req: actix_test::TestRequest) -> actix_test::TestRequest {
    req.cookie(Cookie::new(SESSION_COOKIE_NAME, test_key().as_str().to_owned()))
}

async fn call(
    drawings: MockMutableDrawingService,
    req: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let state = state_from(
        resolving_accounts(CALLER),
        MockImmutableDrawingService::new(),
        drawings,
    );
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(web::scope("/api").configure(configure)),
    )
    .await;
    let res = actix_test::call_service(&app, req.to_request()).await;
    let status = res.status();
    let body = actix_test::read_body(res).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, value)
}

#[actix_web::test]
async fn create_returns_created_id() {
    let mut drawings = MockMutableDrawingService::new();
    drawings
        .expect_create()
        .withf(|owner, name, data| {
            *owner == CALLER && name.as_str() == "test" && data.as_str() == r#"{"test": "test"}"#
        })
        .times(1)
        .return_once(|_, _, _| Ok(DrawingId::new(11)));

    let (status, body) = call(
        drawings,
        signed_in(actix_test::TestRequest::post().uri("/api/drawings/mutable"))
            .set_json(json!({ "name": "test", "data": r#"{"test": "test"}"# })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 11 }));
}

#[rstest]
#[case(json!({ "test": "test" }), "name", "missing_field")]
#[case(json!({ "name": "test" }), "data", "missing_field")]
#[case(json!({ "name": "   ", "data": "x" }), "name", "empty_name")]
#[case(json!({ "name": "n".repeat(101), "data": "x" }), "name", "name_too_long")]
#[case(json!({ "name": "test", "data": "" }), "data", "empty_data")]
#[actix_web::test]
async fn create_rejects_invalid_bodies(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut drawings = MockMutableDrawingService::new();
    drawings.expect_create().never();

    let (status, body) = call(
        drawings,
        signed_in(actix_test::TestRequest::post().uri("/api/drawings/mutable")).set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[case(actix_test::TestRequest::post().uri("/api/drawings/mutable").set_json(json!({ "name": "a", "data": "b" })))]
#[case(actix_test::TestRequest::get().uri("/api/drawings/mutable"))]
#[case(actix_test::TestRequest::get().uri("/api/drawings/mutable/1"))]
#[case(actix_test::TestRequest::put().uri("/api/drawings/mutable/1").set_json(json!({ "name": "a" })))]
#[case(actix_test::TestRequest::delete().uri("/api/drawings/mutable/1"))]
#[actix_web::test]
async fn every_route_requires_a_session(#[case] req: actix_test::TestRequest) {
    let (status, body) = call(MockMutableDrawingService::new(), req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}

#[rstest]
#[case("/api/drawings/mutable")]
#[case("/api/drawings/mutables")]
#[actix_web::test]
async fn list_is_served_on_both_paths(#[case] uri: &str) {
    let mut drawings = MockMutableDrawingService::new();
    drawings
        .expect_list()
        .with(eq(CALLER))
        .return_once(|_| {
            Ok(vec![MutableDrawingSummary {
                id: DrawingId::new(2),
                name: "test2".into(),
                created_at: fixture_time(),
            }])
        });

    let (status, body) = call(drawings, signed_in(actix_test::TestRequest::get().uri(uri))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "results": [
            { "id": 2, "name": "test2", "createdAt": "2024-06-01T12:00:00Z" }
        ] })
    );
}

#[actix_web::test]
async fn get_returns_the_full_drawing() {
    let mut drawings = MockMutableDrawingService::new();
    drawings
        .expect_get()
        .with(eq(CALLER), eq(DrawingId::new(5)))
        .return_once(|owner, id| {
            Ok(Some(MutableDrawing {
                id,
                owner,
                name: "test".into(),
                data: "body".into(),
                created_at: fixture_time(),
            }))
        });

    let (status, body) = call(
        drawings,
        signed_in(actix_test::TestRequest::get().uri("/api/drawings/mutable/5")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": 5,
            "userId": 3,
            "name": "test",
            "data": "body",
            "createdAt": "2024-06-01T12:00:00Z"
        })
    );
}

#[actix_web::test]
async fn get_of_foreign_or_missing_drawing_is_not_found() {
    let mut drawings = MockMutableDrawingService::new();
    drawings.expect_get().return_once(|_, _| Ok(None));

    let (status, body) = call(
        drawings,
        signed_in(actix_test::TestRequest::get().uri("/api/drawings/mutable/9")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[case(1, StatusCode::OK)]
#[case(0, StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn update_reports_affected_rows(#[case] affected: u64, #[case] expected: StatusCode) {
    let mut drawings = MockMutableDrawingService::new();
    drawings
        .expect_update()
        .withf(|owner, id, changes| {
            *owner == CALLER
                && *id == DrawingId::new(5)
                && changes.name() == Some("updated")
                && changes.data().is_none()
        })
        .return_once(move |_, _, _| Ok(affected));

    let (status, body) = call(
        drawings,
        signed_in(actix_test::TestRequest::put().uri("/api/drawings/mutable/5"))
            .set_json(json!({ "name": "updated", "data": "" })),
    )
    .await;

    assert_eq!(status, expected);
    if expected == StatusCode::OK {
        assert_eq!(body, json!({ "error": "" }));
    }
}

#[actix_web::test]
async fn update_rejects_overlong_names() {
    let mut drawings = MockMutableDrawingService::new();
    drawings.expect_update().never();

    let (status, body) = call(
        drawings,
        signed_in(actix_test::TestRequest::put().uri("/api/drawings/mutable/5"))
            .set_json(json!({ "name": "n".repeat(101) })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "name_too_long");
}

#[rstest]
#[case(1, StatusCode::OK)]
#[case(0, StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn delete_reports_affected_rows(#[case] affected: u64, #[case] expected: StatusCode) {
    let mut drawings = MockMutableDrawingService::new();
    drawings
        .expect_delete()
        .with(eq(CALLER), eq(DrawingId::new(5)))
        .return_once(move |_, _| Ok(affected));

    let (status, _) = call(
        drawings,
        signed_in(actix_test::TestRequest::delete().uri("/api/drawings/mutable/5")),
    )
    .await;

    assert_eq!(status, expected);
}
