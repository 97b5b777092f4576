use alumnitrack_auth::issue_token;
use alumnitrack_config::JwtConfig;
use alumnitrack_core::{AppError, hash_password, verify_password};
use alumnitrack_db::Stores;
use alumnitrack_models::{LoginRequest, LoginResponse, NewUser, RegisterRequest, User, UserRole};
use alumnitrack_observability::{
    track_login_failure, track_login_success, track_token_issued, track_user_registered,
};
use anyhow::anyhow;
use std::sync::LazyLock;
use tracing::{info, instrument, warn};

pub struct AuthService;

/// Hash checked against when the username is unknown, so both failure paths
/// pay for one bcrypt verification.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("alumnitrack-dummy-password").ok());

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid credentials")
}

fn burn_verification(password: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
}

impl AuthService {
    /// Creates a `user` account. Administrators are only created from the
    /// CLI.
    #[instrument(skip(stores, dto), fields(user.username = %dto.username))]
    pub async fn register(stores: &Stores, dto: RegisterRequest) -> Result<User, AppError> {
        if let Some(alumni_id) = dto.alumni_id {
            if !stores.alumni.exists(alumni_id).await? {
                return Err(AppError::bad_request(anyhow!("Alumni not found")));
            }
        }

        let password_hash = hash_password(&dto.password)?;

        let user = stores
            .users
            .create(NewUser {
                username: dto.username,
                email: dto.email,
                password_hash,
                role: UserRole::User,
                alumni_id: dto.alumni_id,
            })
            .await?;

        track_user_registered();
        info!(user.id = %user.id, "User registered");

        Ok(user)
    }

    #[instrument(skip(stores, dto, jwt_config), fields(user.username = %dto.username))]
    pub async fn login(
        stores: &Stores,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let Some(user) = stores.users.find_by_username(&dto.username).await? else {
            burn_verification(&dto.password);
            track_login_failure("unknown_user");
            warn!("Login failed: unknown username");
            return Err(invalid_credentials());
        };

        if !verify_password(&dto.password, &user.password_hash)? {
            track_login_failure("wrong_password");
            warn!(user.id = %user.id, "Login failed: wrong password");
            return Err(invalid_credentials());
        }

        let token = issue_token(user.id.into_inner(), user.role, jwt_config)?;
        track_token_issued();
        track_login_success(user.role.as_str());
        info!(user.id = %user.id, role = %user.role, "User logged in");

        Ok(LoginResponse {
            token,
            token_type: "Bearer",
            expires_in: jwt_config.token_ttl_secs,
            user,
        })
    }
}
