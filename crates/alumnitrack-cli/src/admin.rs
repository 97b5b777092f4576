use alumnitrack_core::hash_password;
use alumnitrack_db::{StoreError, UserStore};
use alumnitrack_models::{NewUser, User, UserRole};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("{0}")]
    InvalidInput(&'static str),
    #[error("failed to hash password")]
    Hash,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Creates an `admin` account through the credential store.
pub async fn create_admin(
    users: &dyn UserStore,
    username: &str,
    email: &str,
    password: &str,
) -> Result<User, AdminError> {
    let username = username.trim();
    let email = email.trim();

    if username.is_empty() {
        return Err(AdminError::InvalidInput("username must not be empty"));
    }
    if !email.contains('@') {
        return Err(AdminError::InvalidInput("email address is invalid"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AdminError::InvalidInput(
            "password must be at least 6 characters",
        ));
    }

    let password_hash = hash_password(password).map_err(|_| AdminError::Hash)?;

    let user = users
        .create(NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            role: UserRole::Admin,
            alumni_id: None,
        })
        .await?;

    Ok(user)
}
