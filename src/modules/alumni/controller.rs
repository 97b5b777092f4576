use alumnitrack_core::{AppError, ListParams, Paginated};
use alumnitrack_models::{Alumni, AlumniId, CreateAlumniDto, MessageResponse, UpdateAlumniDto};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use super::service::AlumniService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List alumni
#[utoipa::path(
    get,
    path = "/alumni",
    params(ListParams),
    responses(
        (status = 200, description = "Paginated list of alumni", body = Paginated<Alumni>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Alumni"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_alumni_list(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(params): Query<ListParams>,
) -> Result<Json<Paginated<Alumni>>, AppError> {
    let alumni = AlumniService::list_alumni(&state.stores, &params).await?;
    Ok(Json(alumni))
}

/// Get one alumni
#[utoipa::path(
    get,
    path = "/alumni/{id}",
    params(("id" = Uuid, Path, description = "Alumni ID")),
    responses(
        (status = 200, description = "Alumni details", body = Alumni),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Alumni not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Alumni"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_alumni(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Alumni>, AppError> {
    let alumni = AlumniService::get_alumni(&state.stores, AlumniId::from(id)).await?;
    Ok(Json(alumni))
}

/// Create an alumni record
#[utoipa::path(
    post,
    path = "/alumni",
    request_body = CreateAlumniDto,
    responses(
        (status = 201, description = "Alumni created", body = Alumni),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 409, description = "Student number already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Alumni"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn create_alumni(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateAlumniDto>,
) -> Result<(StatusCode, Json<Alumni>), AppError> {
    let alumni = AlumniService::create_alumni(&state.stores, dto).await?;
    Ok((StatusCode::CREATED, Json(alumni)))
}

/// Update name, major or phone of an alumni
#[utoipa::path(
    put,
    path = "/alumni/{id}",
    params(("id" = Uuid, Path, description = "Alumni ID")),
    request_body = UpdateAlumniDto,
    responses(
        (status = 200, description = "Alumni updated", body = Alumni),
        (status = 400, description = "No fields to update", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Alumni not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Alumni"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn update_alumni(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateAlumniDto>,
) -> Result<Json<Alumni>, AppError> {
    let alumni = AlumniService::update_alumni(&state.stores, AlumniId::from(id), dto).await?;
    Ok(Json(alumni))
}

/// Delete an alumni that has no job records
#[utoipa::path(
    delete,
    path = "/alumni/{id}",
    params(("id" = Uuid, Path, description = "Alumni ID")),
    responses(
        (status = 200, description = "Alumni deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Alumni not found", body = ErrorResponse),
        (status = 409, description = "Alumni still owns job records", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Alumni"
)]
#[instrument(skip(state, _admin))]
pub async fn delete_alumni(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    AlumniService::delete_alumni(&state.stores, AlumniId::from(id)).await?;
    Ok(Json(MessageResponse::new("Alumni deleted successfully")))
}
