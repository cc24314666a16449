//! Owned (mutable) drawing handlers.
//!
//! Every route requires a session and acts only on the caller's drawings.
//! Drawings owned by someone else are reported exactly like missing ones.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    DrawingChanges, DrawingId, DrawingName, DrawingPayload, Error, MutableDrawing,
    MutableDrawingSummary, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::OutcomeResponse;
use crate::inbound::http::validation::{FieldName, drawing_field_error, require};

const NAME: FieldName = FieldName::new("name");
const DATA: FieldName = FieldName::new("data");

/// Body of a create request.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateDrawingRequest {
    #[schema(example = "sketch")]
    pub name: Option<String>,
    #[schema(example = "{\"test\": \"test\"}")]
    pub data: Option<String>,
}

/// Body of an update request. Absent or empty fields keep their value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateDrawingRequest {
    pub name: Option<String>,
    pub data: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreatedDrawingResponse {
    #[schema(value_type = i64, example = 1)]
    pub id: DrawingId,
}

/// Full owned drawing.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrawingResponse {
    #[schema(value_type = i64)]
    pub id: DrawingId,
    #[schema(value_type = i64)]
    pub user_id: UserId,
    pub name: String,
    pub data: String,
    pub created_at: DateTime<Utc>,
}

impl From<MutableDrawing> for DrawingResponse {
    fn from(value: MutableDrawing) -> Self {
        Self {
            id: value.id,
            user_id: value.owner,
            name: value.name,
            data: value.data,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrawingSummaryResponse {
    #[schema(value_type = i64)]
    pub id: DrawingId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<MutableDrawingSummary> for DrawingSummaryResponse {
    fn from(value: MutableDrawingSummary) -> Self {
        Self {
            id: value.id,
            name: value.name,
            created_at: value.created_at,
        }
    }
}

/// Page of the caller's drawings, newest first.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct DrawingListResponse {
    pub results: Vec<DrawingSummaryResponse>,
}

fn drawing_not_found() -> Error {
    Error::not_found("drawing not found")
}

fn affected_or_not_found(affected: u64) -> ApiResult<HttpResponse> {
    if affected == 0 {
        return Err(drawing_not_found());
    }
    Ok(HttpResponse::Ok().json(OutcomeResponse::ok()))
}

/// Create a drawing owned by the caller.
#[utoipa::path(
    post,
    path = "/api/drawings/mutable",
    request_body = CreateDrawingRequest,
    responses(
        (status = 201, description = "Drawing created", body = CreatedDrawingResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["drawings"],
    operation_id = "createDrawing"
)]
#[post("/drawings/mutable")]
pub async fn create_drawing(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<CreateDrawingRequest>,
) -> ApiResult<HttpResponse> {
    let CreateDrawingRequest { name, data } = payload.into_inner();
    let name = DrawingName::new(require(name, NAME)?)
        .map_err(|err| drawing_field_error(NAME, err))?;
    let data = DrawingPayload::new(require(data, DATA)?)
        .map_err(|err| drawing_field_error(DATA, err))?;

    let id = state
        .mutable_drawings
        .create(caller.id(), name, data)
        .await?;
    Ok(HttpResponse::Created().json(CreatedDrawingResponse { id }))
}

/// List the caller's drawings.
#[utoipa::path(
    get,
    path = "/api/drawings/mutable",
    responses(
        (status = 200, description = "Caller's drawings", body = DrawingListResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["drawings"],
    operation_id = "listDrawings"
)]
pub async fn list_drawings(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<DrawingListResponse>> {
    let results = state
        .mutable_drawings
        .list(caller.id())
        .await?
        .into_iter()
        .map(DrawingSummaryResponse::from)
        .collect();
    Ok(web::Json(DrawingListResponse { results }))
}

/// Fetch one of the caller's drawings.
#[utoipa::path(
    get,
    path = "/api/drawings/mutable/{id}",
    params(("id" = i64, Path, description = "Drawing identifier")),
    responses(
        (status = 200, description = "Drawing", body = DrawingResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "No such drawing for this caller", body = Error)
    ),
    tags = ["drawings"],
    operation_id = "getDrawing"
)]
#[get("/drawings/mutable/{id}")]
pub async fn get_drawing(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<DrawingResponse>> {
    let id = DrawingId::new(path.into_inner());
    let drawing = state
        .mutable_drawings
        .get(caller.id(), id)
        .await?
        .ok_or_else(drawing_not_found)?;
    Ok(web::Json(drawing.into()))
}

/// Change the name and/or data of one of the caller's drawings.
#[utoipa::path(
    put,
    path = "/api/drawings/mutable/{id}",
    params(("id" = i64, Path, description = "Drawing identifier")),
    request_body = UpdateDrawingRequest,
    responses(
        (status = 200, description = "Drawing updated", body = OutcomeResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "No such drawing for this caller", body = Error)
    ),
    tags = ["drawings"],
    operation_id = "updateDrawing"
)]
#[put("/drawings/mutable/{id}")]
pub async fn update_drawing(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UpdateDrawingRequest>,
) -> ApiResult<HttpResponse> {
    let id = DrawingId::new(path.into_inner());
    let UpdateDrawingRequest { name, data } = payload.into_inner();
    let changes = DrawingChanges::from_parts(name.as_deref(), data.as_deref())
        .map_err(|err| drawing_field_error(NAME, err))?;
    let affected = state
        .mutable_drawings
        .update(caller.id(), id, changes)
        .await?;
    affected_or_not_found(affected)
}

/// Delete one of the caller's drawings.
#[utoipa::path(
    delete,
    path = "/api/drawings/mutable/{id}",
    params(("id" = i64, Path, description = "Drawing identifier")),
    responses(
        (status = 200, description = "Drawing deleted", body = OutcomeResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "No such drawing for this caller", body = Error)
    ),
    tags = ["drawings"],
    operation_id = "deleteDrawing"
)]
#[delete("/drawings/mutable/{id}")]
pub async fn delete_drawing(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = DrawingId::new(path.into_inner());
    let affected = state.mutable_drawings.delete(caller.id(), id).await?;
    affected_or_not_found(affected)
}

/// Register the owned drawing routes, including the plural list alias.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_drawing)
        .route("/drawings/mutable", web::get().to(list_drawings))
        .route("/drawings/mutables", web::get().to(list_drawings))
        .service(get_drawing)
        .service(update_drawing)
        .service(delete_drawing);
}

#[cfg(test)]
#[path = "mutable_drawings_tests.rs"]
mod tests;
