//! Published (immutable) drawing handlers.
//!
//! ```text
//! POST /api/drawings/immutable {"data":"{\"test\": \"test\"}"}
//! GET  /api/drawings/immutable/c59e4
//! ```

use actix_web::{get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{DrawingPayload, Error, ShortKey};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, drawing_field_error, require};

const DATA: FieldName = FieldName::new("data");

/// Body of a publish request.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PublishDrawingRequest {
    #[schema(example = "{\"test\": \"test\"}")]
    pub data: Option<String>,
}

/// Key under which a published drawing can be fetched.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShortKeyResponse {
    #[schema(example = "c59e4")]
    pub short_key: String,
}

/// Published drawing body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishedDrawingResponse {
    pub data: String,
    pub created_at: DateTime<Utc>,
}

fn drawing_not_found() -> Error {
    Error::not_found("drawing not found")
}

/// Publish a drawing and return its short key.
///
/// Publishing identical data again returns the same key.
#[utoipa::path(
    post,
    path = "/api/drawings/immutable",
    request_body = PublishDrawingRequest,
    responses(
        (status = 200, description = "Drawing published", body = ShortKeyResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["drawings"],
    operation_id = "publishDrawing",
    security([])
)]
#[post("/drawings/immutable")]
pub async fn publish_drawing(
    state: web::Data<HttpState>,
    payload: web::Json<PublishDrawingRequest>,
) -> ApiResult<web::Json<ShortKeyResponse>> {
    let raw = require(payload.into_inner().data, DATA)?;
    let data = DrawingPayload::new(raw).map_err(|err| drawing_field_error(DATA, err))?;
    let short_key = state.immutable_drawings.create(data).await?;
    Ok(web::Json(ShortKeyResponse {
        short_key: short_key.to_string(),
    }))
}

/// Fetch a published drawing by short key.
#[utoipa::path(
    get,
    path = "/api/drawings/immutable/{shortKey}",
    params(("shortKey" = String, Path, description = "Lowercase hex short key")),
    responses(
        (status = 200, description = "Published drawing", body = PublishedDrawingResponse),
        (status = 404, description = "Unknown short key", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["drawings"],
    operation_id = "getPublishedDrawing",
    security([])
)]
#[get("/drawings/immutable/{short_key}")]
pub async fn get_published_drawing(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PublishedDrawingResponse>> {
    let raw = path.into_inner();
    // No stored key can fail this parse.
    let short_key = ShortKey::parse(&raw).map_err(|err| {
        debug!(error = %err, short_key = %raw, "unparseable short key");
        drawing_not_found()
    })?;
    let drawing = state
        .immutable_drawings
        .get(&short_key)
        .await?
        .ok_or_else(drawing_not_found)?;
    Ok(web::Json(PublishedDrawingResponse {
        data: drawing.data,
        created_at: drawing.created_at,
    }))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::domain::ImmutableDrawing;
    use crate::domain::ports::{
        MockAccountService, MockImmutableDrawingService, MockMutableDrawingService,
    };
    use crate::inbound::http::test_utils::state_from;
    use crate::inbound::http::validation::json_error_handler;

    async fn call(
        drawings: MockImmutableDrawingService,
        req: actix_test::TestRequest,
    ) -> (StatusCode, Value) {
        let state = state_from(
            MockAccountService::new(),
            drawings,
            MockMutableDrawingService::new(),
        );
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .service(
                    web::scope("/api")
                        .service(publish_drawing)
                        .service(get_published_drawing),
                ),
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
    async fn publishing_returns_the_short_key() {
        let mut drawings = MockImmutableDrawingService::new();
        drawings
            .expect_create()
            .withf(|data| data.as_str() == r#"{"test": "test"}"#)
            .times(1)
            .return_once(|_| Ok(ShortKey::parse("c59e4").expect("fixture key")));

        let (status, body) = call(
            drawings,
            actix_test::TestRequest::post()
                .uri("/api/drawings/immutable")
                .set_json(json!({ "data": r#"{"test": "test"}"# })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "shortKey": "c59e4" }));
    }

    #[rstest]
    #[case(json!({ "test": "test" }), "missing_field")]
    #[case(json!({ "data": "" }), "empty_data")]
    #[actix_web::test]
    async fn invalid_bodies_are_rejected(#[case] payload: Value, #[case] code: &str) {
        let mut drawings = MockImmutableDrawingService::new();
        drawings.expect_create().never();

        let (status, body) = call(
            drawings,
            actix_test::TestRequest::post()
                .uri("/api/drawings/immutable")
                .set_json(payload),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["code"], code);
    }

    #[actix_web::test]
    async fn non_json_bodies_use_the_error_schema() {
        let (status, body) = call(
            MockImmutableDrawingService::new(),
            actix_test::TestRequest::post()
                .uri("/api/drawings/immutable")
                .insert_header(("content-type", "application/json"))
                .set_payload("not json"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["code"], "malformed_body");
    }

    #[actix_web::test]
    async fn published_drawing_is_returned() {
        let created_at = Utc
            .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .single()
            .expect("fixture timestamp");
        let mut drawings = MockImmutableDrawingService::new();
        drawings
            .expect_get()
            .withf(|key| key.as_str() == "c59e4")
            .return_once(move |key| {
                Ok(Some(ImmutableDrawing {
                    short_key: key.clone(),
                    data: r#"{"test": "test"}"#.into(),
                    created_at,
                }))
            });

        let (status, body) = call(
            drawings,
            actix_test::TestRequest::get().uri("/api/drawings/immutable/c59e4"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], r#"{"test": "test"}"#);
        assert_eq!(body["createdAt"], "2024-06-01T12:00:00Z");
    }

    #[rstest]
    #[case("/api/drawings/immutable/NOT-HEX")]
    #[case("/api/drawings/immutable/c59e4")]
    #[actix_web::test]
    async fn unknown_or_malformed_keys_are_not_found(#[case] uri: &str) {
        let mut drawings = MockImmutableDrawingService::new();
        drawings.expect_get().returning(|_| Ok(None));

        let (status, body) = call(drawings, actix_test::TestRequest::get().uri(uri)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }
}
