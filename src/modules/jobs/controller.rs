use alumnitrack_core::{AppError, ListParams, Paginated};
use alumnitrack_models::{
    AlumniId, CreateJobDto, JobId, JobRecord, OwnerFilter, TransitionResponse, UpdateJobDto,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use super::service::{JobService, Transition};
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List active jobs
#[utoipa::path(
    get,
    path = "/pekerjaan",
    params(ListParams),
    responses(
        (status = 200, description = "Paginated list of active jobs", body = Paginated<JobRecord>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Jobs"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_jobs(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(params): Query<ListParams>,
) -> Result<Json<Paginated<JobRecord>>, AppError> {
    let jobs = JobService::list_jobs(&state.stores, &params).await?;
    Ok(Json(jobs))
}

/// List active jobs of one alumni
#[utoipa::path(
    get,
    path = "/pekerjaan/{alumni_id}",
    params(("alumni_id" = Uuid, Path, description = "Alumni ID")),
    responses(
        (status = 200, description = "Active jobs of the alumni", body = Vec<JobRecord>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Alumni not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Jobs"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_jobs_by_alumni(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(alumni_id): Path<Uuid>,
) -> Result<Json<Vec<JobRecord>>, AppError> {
    let jobs = JobService::jobs_of_alumni(&state.stores, AlumniId::from(alumni_id)).await?;
    Ok(Json(jobs))
}

/// Get one job, active or trashed
#[utoipa::path(
    get,
    path = "/pekerjaan/detail/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job details", body = JobRecord),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Jobs"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_job(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<JobRecord>, AppError> {
    let job = JobService::get_job(&state.stores, JobId::from(id)).await?;
    Ok(Json(job))
}

/// Create a job record
#[utoipa::path(
    post,
    path = "/pekerjaan",
    request_body = CreateJobDto,
    responses(
        (status = 201, description = "Job created", body = JobRecord),
        (status = 400, description = "Bad request - unknown alumni", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Jobs"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn create_job(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateJobDto>,
) -> Result<(StatusCode, Json<JobRecord>), AppError> {
    let job = JobService::create_job(&state.stores, dto).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// Update employer, position or salary range of an active job
#[utoipa::path(
    put,
    path = "/pekerjaan/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    request_body = UpdateJobDto,
    responses(
        (status = 200, description = "Job updated", body = JobRecord),
        (status = 400, description = "No fields to update", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Active job not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Jobs"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn update_job(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateJobDto>,
) -> Result<Json<JobRecord>, AppError> {
    let job = JobService::update_job(&state.stores, JobId::from(id), dto).await?;
    Ok(Json(job))
}

/// Move jobs to the trash
///
/// Admins with `alumni_id` trash every active job of that alumni; without it
/// only the job in the path. Users can only trash a job of their own alumni.
#[utoipa::path(
    delete,
    path = "/pekerjaan/{id}",
    params(("id" = Uuid, Path, description = "Job ID"), OwnerFilter),
    responses(
        (status = 200, description = "Jobs moved to trash", body = TransitionResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No matching active job", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Jobs"
)]
#[instrument(skip(state, auth_user))]
pub async fn soft_delete_job(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    Query(filter): Query<OwnerFilter>,
) -> Result<Json<TransitionResponse>, AppError> {
    let response = JobService::transition(
        &state.stores,
        &auth_user,
        Transition::SoftDelete,
        JobId::from(id),
        filter.alumni_id(),
    )
    .await?;
    Ok(Json(response))
}

/// List trashed jobs
#[utoipa::path(
    get,
    path = "/trash/pekerjaan",
    params(ListParams),
    responses(
        (status = 200, description = "Paginated list of trashed jobs", body = Paginated<JobRecord>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Trash"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_trash(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<ListParams>,
) -> Result<Json<Paginated<JobRecord>>, AppError> {
    let jobs = JobService::list_trash(&state.stores, &auth_user, &params).await?;
    Ok(Json(jobs))
}

/// Restore trashed jobs
#[utoipa::path(
    put,
    path = "/trash/pekerjaan/{id}/restore",
    params(("id" = Uuid, Path, description = "Job ID"), OwnerFilter),
    responses(
        (status = 200, description = "Jobs restored", body = TransitionResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No matching trashed job", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Trash"
)]
#[instrument(skip(state, auth_user))]
pub async fn restore_job(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    Query(filter): Query<OwnerFilter>,
) -> Result<Json<TransitionResponse>, AppError> {
    let response = JobService::transition(
        &state.stores,
        &auth_user,
        Transition::Restore,
        JobId::from(id),
        filter.alumni_id(),
    )
    .await?;
    Ok(Json(response))
}

/// Permanently delete trashed jobs
#[utoipa::path(
    delete,
    path = "/trash/pekerjaan/{id}/hard-delete",
    params(("id" = Uuid, Path, description = "Job ID"), OwnerFilter),
    responses(
        (status = 200, description = "Jobs permanently deleted", body = TransitionResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No matching trashed job", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Trash"
)]
#[instrument(skip(state, auth_user))]
pub async fn hard_delete_job(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    Query(filter): Query<OwnerFilter>,
) -> Result<Json<TransitionResponse>, AppError> {
    let response = JobService::transition(
        &state.stores,
        &auth_user,
        Transition::HardDelete,
        JobId::from(id),
        filter.alumni_id(),
    )
    .await?;
    Ok(Json(response))
}
