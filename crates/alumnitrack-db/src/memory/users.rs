use std::collections::HashMap;
use std::time::Duration;

use alumnitrack_core::ListQuery;
use alumnitrack_models::{NewUser, User, UserId, UserSortField};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{contains_ci, paginate};
use crate::error::StoreError;
use crate::store::{StoreResult, UserStore};
use crate::timeout::bounded;

struct StoredUser {
    user: User,
    deleted_at: Option<DateTime<Utc>>,
}

impl StoredUser {
    fn live(&self) -> Option<&User> {
        self.deleted_at.is_none().then_some(&self.user)
    }
}

pub struct MemoryUserStore {
    users: RwLock<HashMap<UserId, StoredUser>>,
    timeout: Duration,
}

impl MemoryUserStore {
    pub fn new(timeout: Duration) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            timeout,
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        bounded(self.timeout, "users.find_by_id", async {
            let users = self.users.read().await;
            Ok(users.get(&id).and_then(StoredUser::live).cloned())
        })
        .await
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        bounded(self.timeout, "users.find_by_username", async {
            let users = self.users.read().await;
            Ok(users
                .values()
                .filter_map(StoredUser::live)
                .find(|u| u.username == username)
                .cloned())
        })
        .await
    }

    async fn create(&self, new_user: NewUser) -> StoreResult<User> {
        bounded(self.timeout, "users.create", async {
            let mut users = self.users.write().await;
            for existing in users.values().filter_map(StoredUser::live) {
                if existing.username == new_user.username {
                    return Err(StoreError::AlreadyExists("username"));
                }
                if existing.email == new_user.email {
                    return Err(StoreError::AlreadyExists("email"));
                }
            }

            let user = User {
                id: UserId::new(),
                username: new_user.username,
                email: new_user.email,
                password_hash: new_user.password_hash,
                role: new_user.role,
                alumni_id: new_user.alumni_id,
                created_at: Utc::now(),
            };
            users.insert(
                user.id,
                StoredUser {
                    user: user.clone(),
                    deleted_at: None,
                },
            );
            Ok(user)
        })
        .await
    }

    async fn search(&self, query: &ListQuery<UserSortField>) -> StoreResult<(Vec<User>, i64)> {
        bounded(self.timeout, "users.search", async {
            let users = self.users.read().await;
            let needle = query.search.as_deref().map(str::to_lowercase);

            let matching: Vec<User> = users
                .values()
                .filter_map(StoredUser::live)
                .filter(|u| match &needle {
                    Some(n) => contains_ci(&u.username, n) || contains_ci(&u.email, n),
                    None => true,
                })
                .cloned()
                .collect();

            Ok(paginate(matching, query, |a, b| {
                match query.sort_by {
                    UserSortField::Id => a.id.cmp(&b.id),
                    UserSortField::Username => a.username.cmp(&b.username),
                    UserSortField::Email => a.email.cmp(&b.email),
                }
                .then_with(|| a.id.cmp(&b.id))
            }))
        })
        .await
    }

    async fn soft_delete(&self, id: UserId) -> StoreResult<u64> {
        bounded(self.timeout, "users.soft_delete", async {
            let mut users = self.users.write().await;
            match users.get_mut(&id) {
                Some(stored) if stored.deleted_at.is_none() => {
                    stored.deleted_at = Some(Utc::now());
                    Ok(1)
                }
                _ => Ok(0),
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alumnitrack_core::{ListParams, SortOrder};
    use alumnitrack_models::UserRole;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: "hash".to_string(),
            role: UserRole::User,
            alumni_id: None,
        }
    }

    fn store() -> MemoryUserStore {
        MemoryUserStore::new(Duration::from_secs(10))
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let store = store();
        store.create(new_user("alice")).await.unwrap();

        let mut dup = new_user("alice");
        dup.email = "other@example.com".to_string();
        let err = store.create(dup).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists("username")));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = store();
        store.create(new_user("alice")).await.unwrap();

        let mut dup = new_user("bob");
        dup.email = "alice@example.com".to_string();
        let err = store.create(dup).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists("email")));
    }

    #[tokio::test]
    async fn test_soft_deleted_user_is_invisible() {
        let store = store();
        let alice = store.create(new_user("alice")).await.unwrap();

        assert_eq!(store.soft_delete(alice.id).await.unwrap(), 1);
        assert!(store.find_by_id(alice.id).await.unwrap().is_none());
        assert!(store.find_by_username("alice").await.unwrap().is_none());
        assert_eq!(store.soft_delete(alice.id).await.unwrap(), 0);

        let (rows, total) = store
            .search(&ListParams::default().normalize(UserSortField::Id, SortOrder::Asc))
            .await
            .unwrap();
        assert!(rows.is_empty());
        assert_eq!(total, 0);

        // The username is free again once the account is gone.
        store.create(new_user("alice")).await.unwrap();
    }

    #[tokio::test]
    async fn test_search_matches_username_or_email() {
        let store = store();
        store.create(new_user("alice")).await.unwrap();
        store.create(new_user("bob")).await.unwrap();

        let params = ListParams {
            search: Some("ALI".to_string()),
            ..Default::default()
        };
        let (rows, total) = store
            .search(&params.normalize(UserSortField::Username, SortOrder::Asc))
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(rows[0].username, "alice");
    }
}
