use std::collections::HashMap;
use std::time::Duration;

use alumnitrack_core::ListQuery;
use alumnitrack_models::{Alumni, AlumniId, AlumniSortField, CreateAlumniDto, UpdateAlumniDto};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{contains_ci, paginate};
use crate::error::StoreError;
use crate::store::{AlumniStore, StoreResult};
use crate::timeout::bounded;

pub struct MemoryAlumniStore {
    alumni: RwLock<HashMap<AlumniId, Alumni>>,
    timeout: Duration,
}

impl MemoryAlumniStore {
    pub fn new(timeout: Duration) -> Self {
        Self {
            alumni: RwLock::new(HashMap::new()),
            timeout,
        }
    }
}

fn matches_search(alumni: &Alumni, term: &str, needle: &str) -> bool {
    contains_ci(&alumni.name, needle)
        || contains_ci(&alumni.major, needle)
        || contains_ci(&alumni.email, needle)
        || alumni.entry_year.to_string() == term
}

#[async_trait]
impl AlumniStore for MemoryAlumniStore {
    async fn find_by_id(&self, id: AlumniId) -> StoreResult<Option<Alumni>> {
        bounded(self.timeout, "alumni.find_by_id", async {
            Ok(self.alumni.read().await.get(&id).cloned())
        })
        .await
    }

    async fn exists(&self, id: AlumniId) -> StoreResult<bool> {
        bounded(self.timeout, "alumni.exists", async {
            Ok(self.alumni.read().await.contains_key(&id))
        })
        .await
    }

    async fn create(&self, dto: CreateAlumniDto) -> StoreResult<Alumni> {
        bounded(self.timeout, "alumni.create", async {
            let mut alumni = self.alumni.write().await;
            if alumni.values().any(|a| a.nim == dto.nim) {
                return Err(StoreError::AlreadyExists("nim"));
            }

            let now = Utc::now();
            let record = Alumni {
                id: AlumniId::new(),
                nim: dto.nim,
                name: dto.name,
                major: dto.major,
                entry_year: dto.entry_year,
                graduation_year: dto.graduation_year,
                email: dto.email,
                phone: dto.phone,
                address: dto.address,
                created_at: now,
                updated_at: now,
            };
            alumni.insert(record.id, record.clone());
            Ok(record)
        })
        .await
    }

    async fn update(&self, id: AlumniId, dto: UpdateAlumniDto) -> StoreResult<Option<Alumni>> {
        bounded(self.timeout, "alumni.update", async {
            let mut alumni = self.alumni.write().await;
            let Some(record) = alumni.get_mut(&id) else {
                return Ok(None);
            };

            if let Some(name) = dto.name {
                record.name = name;
            }
            if let Some(major) = dto.major {
                record.major = major;
            }
            if let Some(phone) = dto.phone {
                record.phone = Some(phone);
            }
            record.updated_at = Utc::now();
            Ok(Some(record.clone()))
        })
        .await
    }

    async fn delete(&self, id: AlumniId) -> StoreResult<u64> {
        bounded(self.timeout, "alumni.delete", async {
            Ok(self.alumni.write().await.remove(&id).map_or(0, |_| 1))
        })
        .await
    }

    async fn search(
        &self,
        query: &ListQuery<AlumniSortField>,
    ) -> StoreResult<(Vec<Alumni>, i64)> {
        bounded(self.timeout, "alumni.search", async {
            let alumni = self.alumni.read().await;
            let term = query.search.as_deref();
            let needle = term.map(str::to_lowercase);

            let matching: Vec<Alumni> = alumni
                .values()
                .filter(|a| match (term, &needle) {
                    (Some(term), Some(needle)) => matches_search(a, term, needle),
                    _ => true,
                })
                .cloned()
                .collect();

            Ok(paginate(matching, query, |a, b| {
                match query.sort_by {
                    AlumniSortField::Id => a.id.cmp(&b.id),
                    AlumniSortField::Name => a.name.cmp(&b.name),
                    AlumniSortField::EntryYear => a.entry_year.cmp(&b.entry_year),
                    AlumniSortField::Major => a.major.cmp(&b.major),
                    AlumniSortField::Email => a.email.cmp(&b.email),
                }
                .then_with(|| a.id.cmp(&b.id))
            }))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alumnitrack_core::{ListParams, SortOrder};

    fn dto(nim: &str, name: &str, entry_year: i32) -> CreateAlumniDto {
        CreateAlumniDto {
            nim: nim.to_string(),
            name: name.to_string(),
            major: "Informatika".to_string(),
            entry_year,
            graduation_year: None,
            email: format!("{}@example.com", nim),
            phone: None,
            address: None,
        }
    }

    fn store() -> MemoryAlumniStore {
        MemoryAlumniStore::new(Duration::from_secs(10))
    }

    #[tokio::test]
    async fn test_duplicate_nim() {
        let store = store();
        store.create(dto("001", "Budi", 2019)).await.unwrap();
        let err = store.create(dto("001", "Sari", 2020)).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists("nim")));
    }

    #[tokio::test]
    async fn test_update_only_touches_given_fields() {
        let store = store();
        let created = store.create(dto("001", "Budi", 2019)).await.unwrap();

        let updated = store
            .update(
                created.id,
                UpdateAlumniDto {
                    phone: Some("08123".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Budi");
        assert_eq!(updated.phone.as_deref(), Some("08123"));
        assert_eq!(updated.nim, created.nim);
    }

    #[tokio::test]
    async fn test_search_by_entry_year_is_exact() {
        let store = store();
        store.create(dto("001", "Budi", 2019)).await.unwrap();
        store.create(dto("002", "Sari", 2020)).await.unwrap();

        let params = ListParams {
            search: Some("2019".to_string()),
            ..Default::default()
        };
        let (rows, total) = store
            .search(&params.normalize(AlumniSortField::Id, SortOrder::Asc))
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(rows[0].name, "Budi");

        let params = ListParams {
            search: Some("201".to_string()),
            ..Default::default()
        };
        let (_, total) = store
            .search(&params.normalize(AlumniSortField::Id, SortOrder::Asc))
            .await
            .unwrap();
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_delete_counts() {
        let store = store();
        let created = store.create(dto("001", "Budi", 2019)).await.unwrap();
        assert_eq!(store.delete(created.id).await.unwrap(), 1);
        assert_eq!(store.delete(created.id).await.unwrap(), 0);
        assert!(!store.exists(created.id).await.unwrap());
    }
}
