use alumnitrack_core::AppError;
use alumnitrack_models::{User, UserRole};
use axum::{extract::FromRequestParts, http::request::Parts};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Allows the operation when `user` holds exactly `required`.
pub fn require(required: UserRole, user: &User) -> Result<(), AppError> {
    let allowed = match (required, user.role) {
        (UserRole::Admin, UserRole::Admin) => true,
        (UserRole::Admin, UserRole::User) => false,
        (UserRole::User, UserRole::User) => true,
        (UserRole::User, UserRole::Admin) => false,
    };

    if allowed {
        Ok(())
    } else {
        Err(AppError::forbidden(match required {
            UserRole::Admin => "Administrator privileges required",
            UserRole::User => "This operation is limited to regular users",
        }))
    }
}

/// An authenticated administrator.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        require(UserRole::Admin, auth_user.user())?;
        Ok(RequireAdmin(auth_user))
    }
}
