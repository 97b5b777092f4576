use alumnitrack_core::{ListParams, PaginationMeta, SortOrder};
use alumnitrack_models::{
    Alumni, CreateAlumniDto, CreateJobDto, JobRecord, JobState, LoginRequest, LoginResponse,
    MessageResponse, RegisterRequest, TransitionResponse, UpdateAlumniDto, UpdateJobDto, User,
    UserRole,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::health::controller::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::health,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::delete_user,
        crate::modules::alumni::controller::get_alumni_list,
        crate::modules::alumni::controller::get_alumni,
        crate::modules::alumni::controller::create_alumni,
        crate::modules::alumni::controller::update_alumni,
        crate::modules::alumni::controller::delete_alumni,
        crate::modules::jobs::controller::get_jobs,
        crate::modules::jobs::controller::get_jobs_by_alumni,
        crate::modules::jobs::controller::get_job,
        crate::modules::jobs::controller::create_job,
        crate::modules::jobs::controller::update_job,
        crate::modules::jobs::controller::soft_delete_job,
        crate::modules::jobs::controller::get_trash,
        crate::modules::jobs::controller::restore_job,
        crate::modules::jobs::controller::hard_delete_job,
    ),
    components(
        schemas(
            User,
            UserRole,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            MessageResponse,
            Alumni,
            CreateAlumniDto,
            UpdateAlumniDto,
            JobRecord,
            JobState,
            CreateJobDto,
            UpdateJobDto,
            TransitionResponse,
            ListParams,
            PaginationMeta,
            SortOrder,
            ErrorResponse,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Registration and login"),
        (name = "Users", description = "User account management"),
        (name = "Alumni", description = "Alumni records"),
        (name = "Jobs", description = "Job records of alumni"),
        (name = "Trash", description = "Soft-deleted job records")
    ),
    info(
        title = "Alumnitrack API",
        version = "0.1.0",
        description = "Alumni career tracking API built with Rust, Axum, and PostgreSQL, with JWT authentication and a trash / restore lifecycle for job records.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_lifecycle_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/register",
            "/login",
            "/pekerjaan/{id}",
            "/trash/pekerjaan",
            "/trash/pekerjaan/{id}/restore",
            "/trash/pekerjaan/{id}/hard-delete",
            "/Users/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
