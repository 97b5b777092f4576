//! Request identity and access control.
//!
//! - [`auth`]: the `AuthUser` extractor and the `require_auth` layer that
//!   resolve a bearer token to a live user account
//! - [`role`]: the role guard and the `RequireAdmin` extractor
//!
//! # Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. The token is verified and the account it names is loaded from the
//!    credential store; failures answer 401
//! 3. Admin-only handlers take `RequireAdmin`, which answers 403 for any
//!    other role
//! 4. The handler runs with the loaded `User`
//!
//! ```ignore
//! async fn create_job(
//!     State(state): State<AppState>,
//!     RequireAdmin(admin): RequireAdmin,
//!     ValidatedJson(dto): ValidatedJson<CreateJobDto>,
//! ) -> Result<Json<JobRecord>, AppError> {
//!     // only admins get here
//! }
//! ```

pub mod auth;
pub mod role;
