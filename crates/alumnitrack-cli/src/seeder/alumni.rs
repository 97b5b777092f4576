//! Alumni seeding.

use std::time::Instant;

use alumnitrack_models::AlumniId;
use fake::Fake;
use fake::faker::address::en::{CityName, StreetName};
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use super::SeedResult;
use super::models::{AlumniSeed, SEED_EMAIL_DOMAIN};

const MAJORS: &[&str] = &[
    "Informatics",
    "Information Systems",
    "Electrical Engineering",
    "Industrial Engineering",
    "Accounting",
    "Management",
    "Communication Science",
    "Civil Engineering",
];

// 9 params per alumni
const BATCH_SIZE: usize = 1000;

pub fn generate_alumni(count: usize) -> Vec<AlumniSeed> {
    (0..count).into_par_iter().map(generate_one).collect()
}

fn generate_one(idx: usize) -> AlumniSeed {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let entry_year: i32 = (2005..2021).fake();
    let graduated = (0..10).fake::<u8>() < 8;
    let major = MAJORS[(0..MAJORS.len()).fake::<usize>()];
    let street: String = StreetName().fake();
    let city: String = CityName().fake();
    let serial: u32 = (0..1_000_000).fake();

    AlumniSeed {
        nim: format!("{}{:06}{:04}", entry_year, serial, idx % 10_000),
        name: format!("{} {}", first_name, last_name),
        major: major.to_string(),
        entry_year,
        graduation_year: graduated.then(|| entry_year + (4..6).fake::<i32>()),
        email: format!(
            "{}.{}+alumni{}@{}",
            first_name.to_lowercase(),
            last_name.to_lowercase(),
            idx,
            SEED_EMAIL_DOMAIN
        ),
        phone: Some(PhoneNumber().fake()),
        address: Some(format!("{}, {}", street, city)),
    }
}

pub async fn seed_alumni(db: &PgPool, count: usize) -> SeedResult<Vec<AlumniId>> {
    let start_time = Instant::now();
    println!("🎓 Seeding {} alumni...", count);

    let alumni = generate_alumni(count);
    let ids = insert_alumni_batch(db, &alumni).await?;

    println!(
        "   ✓ Inserted {} alumni in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

/// Inserts alumni in one transaction. Rows whose `nim` already exists are
/// skipped, so the returned ids can be fewer than `alumni`.
pub async fn insert_alumni_batch(db: &PgPool, alumni: &[AlumniSeed]) -> SeedResult<Vec<AlumniId>> {
    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(alumni.len());

    for chunk in alumni.chunks(BATCH_SIZE) {
        ids.extend(insert_alumni_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;
    Ok(ids)
}

async fn insert_alumni_chunk(
    tx: &mut Transaction<'_, Postgres>,
    alumni: &[AlumniSeed],
) -> SeedResult<Vec<AlumniId>> {
    if alumni.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb = QueryBuilder::<Postgres>::new(
        "INSERT INTO alumni (id, nim, name, major, entry_year, graduation_year, email, phone, address) ",
    );
    qb.push_values(alumni, |mut row, a| {
        row.push_bind(AlumniId::new())
            .push_bind(&a.nim)
            .push_bind(&a.name)
            .push_bind(&a.major)
            .push_bind(a.entry_year)
            .push_bind(a.graduation_year)
            .push_bind(&a.email)
            .push_bind(&a.phone)
            .push_bind(&a.address);
    });
    qb.push(" ON CONFLICT (nim) DO NOTHING RETURNING id");

    let ids: Vec<AlumniId> = qb.build_query_scalar().fetch_all(&mut **tx).await?;
    Ok(ids)
}

/// Deletes seeded alumni. Their jobs must be cleared first.
pub async fn clear_alumni(db: &PgPool) -> SeedResult<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded alumni...");

    let result = sqlx::query("DELETE FROM alumni WHERE email LIKE $1")
        .bind(format!("%@{}", SEED_EMAIL_DOMAIN))
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} alumni in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_alumni_count_and_shape() {
        let alumni = generate_alumni(50);
        assert_eq!(alumni.len(), 50);

        for a in &alumni {
            assert!((2005..2021).contains(&a.entry_year));
            if let Some(grad) = a.graduation_year {
                assert!(grad > a.entry_year);
            }
            assert!(a.email.ends_with("@example.com"));
            assert!(MAJORS.contains(&a.major.as_str()));
        }
    }

    #[test]
    fn test_generated_emails_are_unique() {
        let alumni = generate_alumni(200);
        let emails: HashSet<_> = alumni.iter().map(|a| a.email.as_str()).collect();
        assert_eq!(emails.len(), 200);
    }
}
