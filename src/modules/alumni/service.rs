use alumnitrack_core::{AppError, ListParams, Paginated, SortOrder};
use alumnitrack_db::Stores;
use alumnitrack_models::{Alumni, AlumniId, AlumniSortField, CreateAlumniDto, UpdateAlumniDto};
use alumnitrack_observability::track_alumni_created;
use anyhow::anyhow;
use tracing::{info, instrument};

pub struct AlumniService;

fn alumni_not_found() -> AppError {
    AppError::not_found(anyhow!("Alumni not found"))
}

impl AlumniService {
    #[instrument(skip(stores))]
    pub async fn list_alumni(
        stores: &Stores,
        params: &ListParams,
    ) -> Result<Paginated<Alumni>, AppError> {
        let query = params.normalize(AlumniSortField::Id, SortOrder::Asc);
        let (alumni, total) = stores.alumni.search(&query).await?;
        Ok(Paginated::new(alumni, query.meta(total)))
    }

    #[instrument(skip(stores), fields(alumni.id = %id))]
    pub async fn get_alumni(stores: &Stores, id: AlumniId) -> Result<Alumni, AppError> {
        stores
            .alumni
            .find_by_id(id)
            .await?
            .ok_or_else(alumni_not_found)
    }

    #[instrument(skip(stores, dto), fields(alumni.nim = %dto.nim))]
    pub async fn create_alumni(stores: &Stores, dto: CreateAlumniDto) -> Result<Alumni, AppError> {
        if let Some(graduated) = dto.graduation_year {
            if graduated < dto.entry_year {
                return Err(AppError::unprocessable(anyhow!(
                    "graduation_year must not be before entry_year"
                )));
            }
        }

        let alumni = stores.alumni.create(dto).await?;
        track_alumni_created();
        info!(alumni.id = %alumni.id, "Alumni created");
        Ok(alumni)
    }

    #[instrument(skip(stores, dto), fields(alumni.id = %id))]
    pub async fn update_alumni(
        stores: &Stores,
        id: AlumniId,
        dto: UpdateAlumniDto,
    ) -> Result<Alumni, AppError> {
        if dto.is_empty() {
            return Err(AppError::bad_request(anyhow!("No fields to update")));
        }

        stores
            .alumni
            .update(id, dto)
            .await?
            .ok_or_else(alumni_not_found)
    }

    /// Deletes an alumni that owns no job records, active or trashed.
    #[instrument(skip(stores), fields(alumni.id = %id))]
    pub async fn delete_alumni(stores: &Stores, id: AlumniId) -> Result<(), AppError> {
        if !stores.alumni.exists(id).await? {
            return Err(alumni_not_found());
        }

        let jobs = stores.jobs.count_by_owner(id).await?;
        if jobs > 0 {
            return Err(AppError::conflict(anyhow!(
                "Alumni still has {} job record(s); hard-delete them first",
                jobs
            )));
        }

        if stores.alumni.delete(id).await? == 0 {
            return Err(alumni_not_found());
        }

        info!("Alumni deleted");
        Ok(())
    }
}
