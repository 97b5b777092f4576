use alumnitrack_auth::verify_token;
use alumnitrack_core::AppError;
use alumnitrack_models::{AlumniId, User, UserId};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::state::AppState;

/// The account behind a verified bearer token.
///
/// Resolved once per request; the user is re-read from the credential store
/// so a deleted account is rejected even while its token is still valid.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn user(&self) -> &User {
        &self.0
    }

    pub fn id(&self) -> UserId {
        self.0.id
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin()
    }

    /// Alumni record the caller owns, if the account is linked to one.
    pub fn alumni_id(&self) -> Option<AlumniId> {
        self.0.alumni_id
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::unauthorized("Missing bearer token"))
}

async fn resolve(parts: &Parts, state: &AppState) -> Result<AuthUser, AppError> {
    let token = bearer_token(parts)?;

    let claims = verify_token(token, &state.jwt_config).inspect_err(|e| {
        debug!(error = %e, "Rejected bearer token");
    })?;
    let user_id = UserId::from(claims.user_id()?);

    let user = state
        .stores
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("User not found"))?;

    Ok(AuthUser(user))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let user = resolve(parts, state).await?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

/// Route layer that rejects unauthenticated requests before any handler
/// or body extractor runs, and leaves the resolved [`AuthUser`] in the
/// request extensions.
///
/// ```ignore
/// init_jobs_router()
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
/// ```
pub async fn require_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    AuthUser::from_request_parts(&mut parts, &state).await?;
    Ok(next.run(Request::from_parts(parts, body)).await)
}
