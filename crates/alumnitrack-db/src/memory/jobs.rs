use std::collections::HashMap;
use std::time::Duration;

use alumnitrack_core::ListQuery;
use alumnitrack_models::{
    AlumniId, CreateJobDto, JobId, JobRecord, JobSortField, JobState, TrashSortField,
    UpdateJobDto,
};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{cmp_nullable, contains_ci, paginate};
use crate::store::{JobStore, StoreResult};
use crate::timeout::bounded;

pub struct MemoryJobStore {
    jobs: RwLock<HashMap<JobId, JobRecord>>,
    timeout: Duration,
}

impl MemoryJobStore {
    pub fn new(timeout: Duration) -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
            timeout,
        }
    }

    /// Applies `transition` to every job matching `selects`, returning how
    /// many changed. Selection and mutation happen under one write lock.
    async fn transition(
        &self,
        operation: &'static str,
        selects: impl Fn(&JobRecord) -> bool + Send + Sync,
        transition: impl Fn(&mut JobRecord) + Send + Sync,
    ) -> StoreResult<u64> {
        bounded(self.timeout, operation, async {
            let mut jobs = self.jobs.write().await;
            let mut affected = 0;
            for job in jobs.values_mut() {
                if selects(&*job) {
                    transition(job);
                    affected += 1;
                }
            }
            Ok(affected)
        })
        .await
    }

    async fn purge(
        &self,
        operation: &'static str,
        selects: impl Fn(&JobRecord) -> bool + Send + Sync,
    ) -> StoreResult<u64> {
        bounded(self.timeout, operation, async {
            let mut jobs = self.jobs.write().await;
            let before = jobs.len();
            jobs.retain(|_, j| !selects(&*j));
            Ok((before - jobs.len()) as u64)
        })
        .await
    }
}

fn owned_by(job: &JobRecord, owner: Option<AlumniId>) -> bool {
    owner.is_none_or(|owner| job.alumni_id == owner)
}

fn trash(job: &mut JobRecord) {
    let now = Utc::now();
    job.state = JobState::Trashed { deleted_at: now };
    job.updated_at = now;
}

fn restore(job: &mut JobRecord) {
    job.state = JobState::Active;
    job.updated_at = Utc::now();
}

fn matches_active_search(job: &JobRecord, needle: &str) -> bool {
    contains_ci(&job.alumni_id.to_string(), needle)
        || contains_ci(&job.employer, needle)
        || contains_ci(&job.position, needle)
        || contains_ci(&job.industry, needle)
        || contains_ci(&job.location, needle)
        || job
            .salary_range
            .as_deref()
            .is_some_and(|s| contains_ci(s, needle))
}

fn matches_trash_search(job: &JobRecord, needle: &str) -> bool {
    contains_ci(&job.alumni_id.to_string(), needle)
        || contains_ci(&job.employer, needle)
        || contains_ci(&job.position, needle)
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn find_by_owner(&self, owner: AlumniId) -> StoreResult<Vec<JobRecord>> {
        bounded(self.timeout, "jobs.find_by_owner", async {
            let jobs = self.jobs.read().await;
            let mut owned: Vec<JobRecord> = jobs
                .values()
                .filter(|j| j.alumni_id == owner && j.state.is_active())
                .cloned()
                .collect();
            owned.sort_by(|a, b| b.start_date.cmp(&a.start_date).then_with(|| a.id.cmp(&b.id)));
            Ok(owned)
        })
        .await
    }

    async fn find_by_id(&self, id: JobId) -> StoreResult<Option<JobRecord>> {
        bounded(self.timeout, "jobs.find_by_id", async {
            Ok(self.jobs.read().await.get(&id).cloned())
        })
        .await
    }

    async fn count_by_owner(&self, owner: AlumniId) -> StoreResult<i64> {
        bounded(self.timeout, "jobs.count_by_owner", async {
            let jobs = self.jobs.read().await;
            Ok(jobs.values().filter(|j| j.alumni_id == owner).count() as i64)
        })
        .await
    }

    async fn create(&self, dto: CreateJobDto) -> StoreResult<JobRecord> {
        bounded(self.timeout, "jobs.create", async {
            let now = Utc::now();
            let job = JobRecord {
                id: JobId::new(),
                alumni_id: dto.alumni_id,
                employer: dto.employer,
                position: dto.position,
                industry: dto.industry,
                location: dto.location,
                salary_range: dto.salary_range,
                start_date: dto.start_date,
                end_date: dto.end_date,
                employment_status: dto.employment_status,
                description: dto.description,
                created_at: now,
                updated_at: now,
                state: JobState::Active,
            };
            self.jobs.write().await.insert(job.id, job.clone());
            Ok(job)
        })
        .await
    }

    async fn update(&self, id: JobId, dto: UpdateJobDto) -> StoreResult<Option<JobRecord>> {
        bounded(self.timeout, "jobs.update", async {
            let mut jobs = self.jobs.write().await;
            let Some(job) = jobs.get_mut(&id).filter(|j| j.state.is_active()) else {
                return Ok(None);
            };

            if let Some(employer) = dto.employer {
                job.employer = employer;
            }
            if let Some(position) = dto.position {
                job.position = position;
            }
            if let Some(salary_range) = dto.salary_range {
                job.salary_range = Some(salary_range);
            }
            job.updated_at = Utc::now();
            Ok(Some(job.clone()))
        })
        .await
    }

    async fn search(&self, query: &ListQuery<JobSortField>) -> StoreResult<(Vec<JobRecord>, i64)> {
        bounded(self.timeout, "jobs.search", async {
            let jobs = self.jobs.read().await;
            let needle = query.search.as_deref().map(str::to_lowercase);

            let matching: Vec<JobRecord> = jobs
                .values()
                .filter(|j| j.state.is_active())
                .filter(|j| needle.as_deref().is_none_or(|n| matches_active_search(j, n)))
                .cloned()
                .collect();

            Ok(paginate(matching, query, |a, b| {
                match query.sort_by {
                    JobSortField::Id => a.id.cmp(&b.id),
                    JobSortField::AlumniId => a.alumni_id.cmp(&b.alumni_id),
                    JobSortField::Employer => a.employer.cmp(&b.employer),
                    JobSortField::Position => a.position.cmp(&b.position),
                    JobSortField::Industry => a.industry.cmp(&b.industry),
                    JobSortField::Location => a.location.cmp(&b.location),
                    JobSortField::SalaryRange => cmp_nullable(&a.salary_range, &b.salary_range),
                }
                .then_with(|| a.id.cmp(&b.id))
            }))
        })
        .await
    }

    async fn search_trash(
        &self,
        query: &ListQuery<TrashSortField>,
        owner: Option<AlumniId>,
    ) -> StoreResult<(Vec<JobRecord>, i64)> {
        bounded(self.timeout, "jobs.search_trash", async {
            let jobs = self.jobs.read().await;
            let needle = query.search.as_deref().map(str::to_lowercase);

            let matching: Vec<JobRecord> = jobs
                .values()
                .filter(|j| j.state.is_trashed() && owned_by(j, owner))
                .filter(|j| needle.as_deref().is_none_or(|n| matches_trash_search(j, n)))
                .cloned()
                .collect();

            Ok(paginate(matching, query, |a, b| {
                match query.sort_by {
                    TrashSortField::Id => a.id.cmp(&b.id),
                    TrashSortField::AlumniId => a.alumni_id.cmp(&b.alumni_id),
                    TrashSortField::Employer => a.employer.cmp(&b.employer),
                    TrashSortField::Position => a.position.cmp(&b.position),
                    TrashSortField::DeletedAt => {
                        cmp_nullable(&a.state.deleted_at(), &b.state.deleted_at())
                    }
                }
                .then_with(|| a.id.cmp(&b.id))
            }))
        })
        .await
    }

    async fn soft_delete_one(&self, id: JobId, owner: Option<AlumniId>) -> StoreResult<u64> {
        self.transition(
            "jobs.soft_delete_one",
            move |j| j.id == id && j.state.is_active() && owned_by(j, owner),
            trash,
        )
        .await
    }

    async fn soft_delete_all_for_owner(&self, owner: AlumniId) -> StoreResult<u64> {
        self.transition(
            "jobs.soft_delete_all_for_owner",
            move |j| j.alumni_id == owner && j.state.is_active(),
            trash,
        )
        .await
    }

    async fn restore_one(&self, id: JobId, owner: Option<AlumniId>) -> StoreResult<u64> {
        self.transition(
            "jobs.restore_one",
            move |j| j.id == id && j.state.is_trashed() && owned_by(j, owner),
            restore,
        )
        .await
    }

    async fn restore_all_for_owner(&self, owner: AlumniId) -> StoreResult<u64> {
        self.transition(
            "jobs.restore_all_for_owner",
            move |j| j.alumni_id == owner && j.state.is_trashed(),
            restore,
        )
        .await
    }

    async fn hard_delete_one(&self, id: JobId, owner: Option<AlumniId>) -> StoreResult<u64> {
        self.purge("jobs.hard_delete_one", move |j| {
            j.id == id && j.state.is_trashed() && owned_by(j, owner)
        })
        .await
    }

    async fn hard_delete_all_for_owner(&self, owner: AlumniId) -> StoreResult<u64> {
        self.purge("jobs.hard_delete_all_for_owner", move |j| {
            j.alumni_id == owner && j.state.is_trashed()
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alumnitrack_core::{ListParams, SortOrder};
    use chrono::NaiveDate;

    fn store() -> MemoryJobStore {
        MemoryJobStore::new(Duration::from_secs(10))
    }

    fn dto(owner: AlumniId, employer: &str) -> CreateJobDto {
        CreateJobDto {
            alumni_id: owner,
            employer: employer.to_string(),
            position: "Engineer".to_string(),
            industry: "Software".to_string(),
            location: "Bandung".to_string(),
            salary_range: None,
            start_date: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
            end_date: None,
            employment_status: "active".to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_soft_delete_requires_owner_match() {
        let store = store();
        let (a2, a3) = (AlumniId::new(), AlumniId::new());
        let j2 = store.create(dto(a3, "Acme")).await.unwrap();

        assert_eq!(store.soft_delete_one(j2.id, Some(a2)).await.unwrap(), 0);
        let j2 = store.find_by_id(j2.id).await.unwrap().unwrap();
        assert!(j2.state.is_active());

        assert_eq!(store.soft_delete_one(j2.id, Some(a3)).await.unwrap(), 1);
        assert_eq!(store.soft_delete_one(j2.id, Some(a3)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_restore_requires_trashed_state() {
        let store = store();
        let owner = AlumniId::new();
        let job = store.create(dto(owner, "Acme")).await.unwrap();

        assert_eq!(store.restore_one(job.id, None).await.unwrap(), 0);

        store.soft_delete_one(job.id, None).await.unwrap();
        assert_eq!(store.restore_one(job.id, Some(owner)).await.unwrap(), 1);
        assert!(store.find_by_id(job.id).await.unwrap().unwrap().state.is_active());
    }

    #[tokio::test]
    async fn test_bulk_transitions_only_touch_one_owner() {
        let store = store();
        let (a1, other) = (AlumniId::new(), AlumniId::new());
        for name in ["A", "B", "C"] {
            store.create(dto(a1, name)).await.unwrap();
        }
        let untouched = store.create(dto(other, "D")).await.unwrap();

        assert_eq!(store.soft_delete_all_for_owner(a1).await.unwrap(), 3);
        assert!(store.find_by_owner(a1).await.unwrap().is_empty());
        assert_eq!(store.find_by_owner(other).await.unwrap().len(), 1);

        assert_eq!(store.restore_all_for_owner(a1).await.unwrap(), 3);
        assert_eq!(store.soft_delete_all_for_owner(a1).await.unwrap(), 3);
        assert_eq!(store.hard_delete_all_for_owner(a1).await.unwrap(), 3);
        assert_eq!(store.count_by_owner(a1).await.unwrap(), 0);
        assert!(store.find_by_id(untouched.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_hard_delete_refuses_active_job() {
        let store = store();
        let job = store.create(dto(AlumniId::new(), "Acme")).await.unwrap();

        assert_eq!(store.hard_delete_one(job.id, None).await.unwrap(), 0);
        assert!(store.find_by_id(job.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_ignores_trashed_job() {
        let store = store();
        let job = store.create(dto(AlumniId::new(), "Acme")).await.unwrap();
        store.soft_delete_one(job.id, None).await.unwrap();

        let updated = store
            .update(
                job.id,
                UpdateJobDto {
                    employer: Some("Globex".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_trash_listing_scopes_by_owner() {
        let store = store();
        let (mine, theirs) = (AlumniId::new(), AlumniId::new());
        let a = store.create(dto(mine, "Acme")).await.unwrap();
        let b = store.create(dto(theirs, "Globex")).await.unwrap();
        store.soft_delete_one(a.id, None).await.unwrap();
        store.soft_delete_one(b.id, None).await.unwrap();

        let query = ListParams::default().normalize(TrashSortField::DeletedAt, SortOrder::Desc);
        let (all, total) = store.search_trash(&query, None).await.unwrap();
        assert_eq!((all.len(), total), (2, 2));

        let (own, total) = store.search_trash(&query, Some(mine)).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(own[0].id, a.id);
    }

    #[tokio::test]
    async fn test_active_search_is_case_insensitive() {
        let store = store();
        let owner = AlumniId::new();
        store.create(dto(owner, "PT Telkom Indonesia")).await.unwrap();
        store.create(dto(owner, "Gojek")).await.unwrap();

        let params = ListParams {
            search: Some("telkom".to_string()),
            ..Default::default()
        };
        let (rows, total) = store
            .search(&params.normalize(JobSortField::Id, SortOrder::Asc))
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(rows[0].employer, "PT Telkom Indonesia");
    }
}
