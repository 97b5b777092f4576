//! Token issuance and verification.
//!
//! Tokens are signed with HS256 using the process-wide secret from
//! [`JwtConfig`]. Verification checks the signature before any claim is
//! read, then checks expiry with zero leeway.

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use uuid::Uuid;

use alumnitrack_config::JwtConfig;
use alumnitrack_core::AppError;

use crate::claims::Claims;
use crate::role::UserRole;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("token is malformed")]
    Malformed,
    #[error("failed to encode token: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Encoding(_) => AppError::internal(err),
            _ => AppError::unauthorized("Invalid or expired token"),
        }
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation
}

/// Issues a signed token for `user_id` valid for the configured lifetime.
///
/// # Errors
///
/// Returns [`TokenError::Encoding`] if the claims cannot be signed.
pub fn issue_token(
    user_id: Uuid,
    role: UserRole,
    jwt_config: &JwtConfig,
) -> Result<String, TokenError> {
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        role,
        exp: now + jwt_config.token_ttl_secs as usize,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| TokenError::Encoding(e.to_string()))
}

/// Verifies a token and returns its claims.
///
/// # Errors
///
/// - [`TokenError::InvalidSignature`] when the signature does not match
/// - [`TokenError::Expired`] when `exp` has passed
/// - [`TokenError::Malformed`] for anything that cannot be decoded
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation(),
    )
    .map(|data| data.claims)
    .map_err(TokenError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig::new("test-secret-key-at-least-32-characters-long")
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_and_verify() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = issue_token(user_id, UserRole::User, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.role, UserRole::User);
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn test_wrong_secret_is_invalid_signature() {
        let token = issue_token(Uuid::new_v4(), UserRole::Admin, &test_config()).unwrap();
        let other = JwtConfig::new("different-secret-key-at-least-32-characters");

        assert_eq!(
            verify_token(&token, &other),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_expired_token() {
        let config = test_config();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            role: UserRole::User,
            exp: now - 60,
            iat: now - 3600,
        };
        let token = sign(&claims, &config.secret);

        assert_eq!(verify_token(&token, &config), Err(TokenError::Expired));
    }

    #[test]
    fn test_expired_token_with_bad_signature_reports_signature() {
        let config = test_config();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            role: UserRole::User,
            exp: now - 60,
            iat: now - 3600,
        };
        let token = sign(&claims, "some-other-secret");

        assert_eq!(
            verify_token(&token, &config),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let config = test_config();
        assert_eq!(verify_token("invalid-token", &config), Err(TokenError::Malformed));
        assert_eq!(verify_token("", &config), Err(TokenError::Malformed));
    }

    #[test]
    fn test_unknown_role_claim_is_malformed() {
        #[derive(serde::Serialize)]
        struct Forged {
            sub: String,
            role: &'static str,
            exp: usize,
            iat: usize,
        }
        let config = test_config();
        let now = Utc::now().timestamp() as usize;
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Forged {
                sub: Uuid::new_v4().to_string(),
                role: "root",
                exp: now + 60,
                iat: now,
            },
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert_eq!(verify_token(&token, &config), Err(TokenError::Malformed));
    }

    #[test]
    fn test_token_error_maps_to_unauthorized() {
        let err: AppError = TokenError::Expired.into();
        assert_eq!(err.status.as_u16(), 401);

        let err: AppError = TokenError::Encoding("boom".into()).into();
        assert_eq!(err.status.as_u16(), 500);
    }
}
