use alumnitrack_core::{AppError, ListParams, Paginated, SortOrder};
use alumnitrack_db::Stores;
use alumnitrack_models::{User, UserId, UserSortField};
use anyhow::anyhow;
use tracing::{info, instrument};

use crate::middleware::auth::AuthUser;

pub struct UserService;

impl UserService {
    #[instrument(skip(stores))]
    pub async fn list_users(
        stores: &Stores,
        params: &ListParams,
    ) -> Result<Paginated<User>, AppError> {
        let query = params.normalize(UserSortField::Id, SortOrder::Asc);
        let (users, total) = stores.users.search(&query).await?;
        Ok(Paginated::new(users, query.meta(total)))
    }

    /// Soft-deletes an account. Admins may delete any account, everyone else
    /// only their own.
    #[instrument(skip(stores, caller), fields(caller.id = %caller.id()))]
    pub async fn delete_user(stores: &Stores, caller: &AuthUser, id: UserId) -> Result<(), AppError> {
        if !caller.is_admin() && caller.id() != id {
            return Err(AppError::forbidden("You can only delete your own account"));
        }

        if stores.users.soft_delete(id).await? == 0 {
            return Err(AppError::not_found(anyhow!("User not found")));
        }

        info!(user.id = %id, "User soft-deleted");
        Ok(())
    }
}
