//! # Alumnitrack Auth
//!
//! Roles, token claims, and the JWT codec for the Alumnitrack API.
//!
//! - [`role`]: the closed [`UserRole`] enum
//! - [`claims`]: JWT claim structure
//! - [`jwt`]: token issuance and verification
//!
//! Tokens are stateless HS256 JWTs carrying the subject id, role, issue
//! time and expiry. There is no server-side revocation; the identity
//! resolver reloads the user on every request instead.
//!
//! # Example
//!
//! ```ignore
//! use alumnitrack_auth::{UserRole, issue_token, verify_token};
//! use alumnitrack_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let token = issue_token(user_id, UserRole::User, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.user_id()?, user_id);
//! ```

pub mod claims;
pub mod jwt;
pub mod role;

pub use claims::Claims;
pub use jwt::{TokenError, issue_token, verify_token};
pub use role::UserRole;
