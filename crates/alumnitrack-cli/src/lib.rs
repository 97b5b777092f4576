//! # Alumnitrack CLI
//!
//! Administrative tasks that have no HTTP endpoint:
//!
//! - [`admin`]: creating administrator accounts (registration only ever
//!   creates `user` accounts)
//! - [`seeder`]: filling a development database with fake alumni and jobs
//!
//! ```ignore
//! use alumnitrack_cli::seeder::{SeedConfig, seed_all};
//!
//! seed_all(&pool, SeedConfig::new(50).with_jobs_per_alumni(3)).await?;
//! ```

pub mod admin;
pub mod seeder;
