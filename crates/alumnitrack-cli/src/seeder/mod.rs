//! Fake data for development databases.
//!
//! Generation runs on the rayon pool; inserts are batched multi-row
//! `INSERT`s inside one transaction per entity.

pub mod alumni;
pub mod jobs;
pub mod models;

use std::time::Instant;

use sqlx::PgPool;

pub use models::SeedConfig;

pub type SeedResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub async fn seed_all(db: &PgPool, config: SeedConfig) -> SeedResult<()> {
    let start_time = Instant::now();
    println!(
        "🌱 Seeding {} alumni with {} jobs each...",
        config.num_alumni, config.jobs_per_alumni
    );

    let alumni_ids = alumni::seed_alumni(db, config.num_alumni).await?;
    if config.jobs_per_alumni > 0 {
        jobs::seed_jobs(db, &alumni_ids, config.jobs_per_alumni, config.trashed_ratio).await?;
    }

    println!("✅ Seeding finished in {:?}", start_time.elapsed());
    Ok(())
}

/// Removes seeded alumni and their jobs. Accounts and hand-entered
/// records are left alone.
pub async fn clear_all(db: &PgPool) -> SeedResult<()> {
    let start_time = Instant::now();

    jobs::clear_jobs(db).await?;
    alumni::clear_alumni(db).await?;

    println!("✅ Seed data cleared in {:?}", start_time.elapsed());
    Ok(())
}
