use alumnitrack_core::{AppError, ListParams, Paginated, SortOrder};
use alumnitrack_db::{JobStore, StoreResult, Stores};
use alumnitrack_models::{
    AlumniId, CreateJobDto, JobId, JobRecord, JobSortField, TransitionResponse, TrashSortField,
    UpdateJobDto, UserRole,
};
use alumnitrack_observability::track_job_transition;
use anyhow::anyhow;
use tracing::{info, instrument};

use crate::middleware::auth::AuthUser;

/// A lifecycle transition of job records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Active to trashed.
    SoftDelete,
    /// Trashed to active.
    Restore,
    /// Trashed to permanently removed.
    HardDelete,
}

impl Transition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transition::SoftDelete => "soft_delete",
            Transition::Restore => "restore",
            Transition::HardDelete => "hard_delete",
        }
    }

    async fn apply_one(
        self,
        jobs: &dyn JobStore,
        id: JobId,
        owner: Option<AlumniId>,
    ) -> StoreResult<u64> {
        match self {
            Transition::SoftDelete => jobs.soft_delete_one(id, owner).await,
            Transition::Restore => jobs.restore_one(id, owner).await,
            Transition::HardDelete => jobs.hard_delete_one(id, owner).await,
        }
    }

    async fn apply_all(self, jobs: &dyn JobStore, owner: AlumniId) -> StoreResult<u64> {
        match self {
            Transition::SoftDelete => jobs.soft_delete_all_for_owner(owner).await,
            Transition::Restore => jobs.restore_all_for_owner(owner).await,
            Transition::HardDelete => jobs.hard_delete_all_for_owner(owner).await,
        }
    }

    fn not_found(&self) -> AppError {
        AppError::not_found(anyhow!(match self {
            Transition::SoftDelete => "Active job not found",
            Transition::Restore | Transition::HardDelete => "Job not found in trash",
        }))
    }

    fn message(&self, affected: u64) -> String {
        let verb = match self {
            Transition::SoftDelete => "moved to trash",
            Transition::Restore => "restored",
            Transition::HardDelete => "permanently deleted",
        };
        if affected == 1 {
            format!("Job {}", verb)
        } else {
            format!("{} jobs {}", affected, verb)
        }
    }
}

pub struct JobService;

impl JobService {
    #[instrument(skip(stores))]
    pub async fn list_jobs(
        stores: &Stores,
        params: &ListParams,
    ) -> Result<Paginated<JobRecord>, AppError> {
        let query = params.normalize(JobSortField::Id, SortOrder::Asc);
        let (jobs, total) = stores.jobs.search(&query).await?;
        Ok(Paginated::new(jobs, query.meta(total)))
    }

    /// Active jobs of one alumni.
    #[instrument(skip(stores), fields(alumni.id = %alumni_id))]
    pub async fn jobs_of_alumni(
        stores: &Stores,
        alumni_id: AlumniId,
    ) -> Result<Vec<JobRecord>, AppError> {
        if !stores.alumni.exists(alumni_id).await? {
            return Err(AppError::not_found(anyhow!("Alumni not found")));
        }
        Ok(stores.jobs.find_by_owner(alumni_id).await?)
    }

    /// One job, active or trashed.
    #[instrument(skip(stores), fields(job.id = %id))]
    pub async fn get_job(stores: &Stores, id: JobId) -> Result<JobRecord, AppError> {
        stores
            .jobs
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Job not found")))
    }

    #[instrument(skip(stores, dto), fields(alumni.id = %dto.alumni_id))]
    pub async fn create_job(stores: &Stores, dto: CreateJobDto) -> Result<JobRecord, AppError> {
        if !stores.alumni.exists(dto.alumni_id).await? {
            return Err(AppError::bad_request(anyhow!("Alumni not found")));
        }

        let job = stores.jobs.create(dto).await?;
        info!(job.id = %job.id, "Job created");
        Ok(job)
    }

    /// Updates employer, position or salary range of an active job.
    #[instrument(skip(stores, dto), fields(job.id = %id))]
    pub async fn update_job(
        stores: &Stores,
        id: JobId,
        dto: UpdateJobDto,
    ) -> Result<JobRecord, AppError> {
        if dto.is_empty() {
            return Err(AppError::bad_request(anyhow!("No fields to update")));
        }

        stores
            .jobs
            .update(id, dto)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Active job not found")))
    }

    /// Trashed jobs, newest deletion first by default. Non-admins only see
    /// jobs of their own alumni.
    #[instrument(skip(stores, caller), fields(caller.id = %caller.id()))]
    pub async fn list_trash(
        stores: &Stores,
        caller: &AuthUser,
        params: &ListParams,
    ) -> Result<Paginated<JobRecord>, AppError> {
        let query = params.normalize(TrashSortField::DeletedAt, SortOrder::Desc);

        let owner = match caller.user().role {
            UserRole::Admin => None,
            UserRole::User => match caller.alumni_id() {
                Some(owner) => Some(owner),
                None => return Ok(Paginated::new(Vec::new(), query.meta(0))),
            },
        };

        let (jobs, total) = stores.jobs.search_trash(&query, owner).await?;
        Ok(Paginated::new(jobs, query.meta(total)))
    }

    /// Applies `transition` with the caller's scope. See the module docs for
    /// the scoping table.
    #[instrument(
        skip(stores, caller, transition),
        fields(caller.id = %caller.id(), job.id = %id, transition = transition.as_str())
    )]
    pub async fn transition(
        stores: &Stores,
        caller: &AuthUser,
        transition: Transition,
        id: JobId,
        filter: Option<AlumniId>,
    ) -> Result<TransitionResponse, AppError> {
        let jobs = &*stores.jobs;

        let affected = match (caller.user().role, filter) {
            (UserRole::Admin, Some(owner)) => transition.apply_all(jobs, owner).await?,
            (UserRole::Admin, None) => {
                let affected = transition.apply_one(jobs, id, None).await?;
                if affected > 0 {
                    info!(
                        audit = true,
                        admin.id = %caller.id(),
                        operation = transition.as_str(),
                        "Admin job transition without ownership check"
                    );
                }
                affected
            }
            (UserRole::User, _) => match caller.alumni_id() {
                Some(owner) => transition.apply_one(jobs, id, Some(owner)).await?,
                None => 0,
            },
        };

        if affected == 0 {
            return Err(transition.not_found());
        }

        track_job_transition(transition.as_str(), affected);
        info!(affected, "Job transition applied");

        Ok(TransitionResponse {
            message: transition.message(affected),
            affected,
        })
    }
}
