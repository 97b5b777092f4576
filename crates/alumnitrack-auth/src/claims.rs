//! JWT claim structure for bearer tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::jwt::TokenError;
use crate::role::UserRole;

/// Claims embedded in every bearer token.
///
/// The role is informational for clients. Authorization decisions use the
/// role of the user record loaded from the store, not this claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub role: UserRole,
    /// Expiration (Unix timestamp)
    pub exp: usize,
    /// Issued-at (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::Malformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize() {
        let claims = Claims {
            sub: "4f1c2f7e-6c38-4d53-9d7e-1b1b2f0a9c11".to_string(),
            role: UserRole::Admin,
            exp: 1234567890,
            iat: 1234567800,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""role":"admin""#));
        assert!(serialized.contains(r#""exp":1234567890"#));
    }

    #[test]
    fn test_user_id_parses_subject() {
        let id = Uuid::new_v4();
        let claims = Claims {
            sub: id.to_string(),
            role: UserRole::User,
            exp: 0,
            iat: 0,
        };
        assert_eq!(claims.user_id().unwrap(), id);
    }

    #[test]
    fn test_non_uuid_subject_is_malformed() {
        let claims = Claims {
            sub: "alice".to_string(),
            role: UserRole::User,
            exp: 0,
            iat: 0,
        };
        assert_eq!(claims.user_id(), Err(TokenError::Malformed));
    }
}
