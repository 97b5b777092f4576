//! Storage traits.
//!
//! Each entity has one trait with a PostgreSQL and an in-memory
//! implementation. Services only ever hold `Arc<dyn ...Store>`.
//!
//! Every implementation bounds each call by the configured store timeout
//! and reports expiry as [`StoreError::Timeout`]. Mutating job calls return
//! the number of affected rows; a transition whose precondition no longer
//! holds (wrong state, wrong owner, missing id) affects zero rows.

use alumnitrack_core::ListQuery;
use alumnitrack_models::{
    Alumni, AlumniId, AlumniSortField, CreateAlumniDto, CreateJobDto, JobId, JobRecord,
    JobSortField, NewUser, TrashSortField, UpdateAlumniDto, UpdateJobDto, User, UserId,
    UserSortField,
};
use async_trait::async_trait;

use crate::error::StoreError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Credential store. Soft-deleted users are invisible to every method.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// # Errors
    ///
    /// [`StoreError::AlreadyExists`] when the username or email is taken by a
    /// live account.
    async fn create(&self, user: NewUser) -> StoreResult<User>;

    /// Matches `search` against username and email.
    async fn search(&self, query: &ListQuery<UserSortField>) -> StoreResult<(Vec<User>, i64)>;

    async fn soft_delete(&self, id: UserId) -> StoreResult<u64>;
}

#[async_trait]
pub trait AlumniStore: Send + Sync {
    async fn find_by_id(&self, id: AlumniId) -> StoreResult<Option<Alumni>>;

    async fn exists(&self, id: AlumniId) -> StoreResult<bool>;

    /// # Errors
    ///
    /// [`StoreError::AlreadyExists`] when the nim is taken.
    async fn create(&self, dto: CreateAlumniDto) -> StoreResult<Alumni>;

    async fn update(&self, id: AlumniId, dto: UpdateAlumniDto) -> StoreResult<Option<Alumni>>;

    async fn delete(&self, id: AlumniId) -> StoreResult<u64>;

    /// Matches `search` against name, major and email, and the entry year
    /// exactly.
    async fn search(&self, query: &ListQuery<AlumniSortField>)
    -> StoreResult<(Vec<Alumni>, i64)>;
}

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Active jobs of one alumni.
    async fn find_by_owner(&self, owner: AlumniId) -> StoreResult<Vec<JobRecord>>;

    /// One job in any state.
    async fn find_by_id(&self, id: JobId) -> StoreResult<Option<JobRecord>>;

    /// Jobs of one alumni in any state.
    async fn count_by_owner(&self, owner: AlumniId) -> StoreResult<i64>;

    async fn create(&self, dto: CreateJobDto) -> StoreResult<JobRecord>;

    /// Updates an active job. Returns `None` when no active job has `id`.
    async fn update(&self, id: JobId, dto: UpdateJobDto) -> StoreResult<Option<JobRecord>>;

    /// Active jobs matching `search` against alumni id, employer, position,
    /// industry, location and salary range.
    async fn search(&self, query: &ListQuery<JobSortField>)
    -> StoreResult<(Vec<JobRecord>, i64)>;

    /// Trashed jobs matching `search` against alumni id, employer and
    /// position, limited to `owner` when given.
    async fn search_trash(
        &self,
        query: &ListQuery<TrashSortField>,
        owner: Option<AlumniId>,
    ) -> StoreResult<(Vec<JobRecord>, i64)>;

    /// Active to trashed for one job, which must belong to `owner` when given.
    async fn soft_delete_one(&self, id: JobId, owner: Option<AlumniId>) -> StoreResult<u64>;

    async fn soft_delete_all_for_owner(&self, owner: AlumniId) -> StoreResult<u64>;

    /// Trashed to active for one job, which must belong to `owner` when given.
    async fn restore_one(&self, id: JobId, owner: Option<AlumniId>) -> StoreResult<u64>;

    async fn restore_all_for_owner(&self, owner: AlumniId) -> StoreResult<u64>;

    /// Permanently removes one trashed job.
    async fn hard_delete_one(&self, id: JobId, owner: Option<AlumniId>) -> StoreResult<u64>;

    async fn hard_delete_all_for_owner(&self, owner: AlumniId) -> StoreResult<u64>;
}
