use std::fmt::Display;
use std::process;

use alumnitrack_cli::admin::create_admin;
use alumnitrack_cli::seeder::{self, SeedConfig};
use alumnitrack_config::DatabaseConfig;
use alumnitrack_db::postgres::PgUserStore;
use alumnitrack_db::{PgPool, init_db_pool, run_migrations};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "alumnitrack-cli")]
#[command(about = "Alumnitrack CLI - Administrative tools for Alumnitrack", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        /// Login name
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake alumni and their jobs
    Seed {
        /// Number of alumni to create
        #[arg(short = 'a', long, default_value = "50")]
        alumni: usize,

        /// Number of jobs per alumni
        #[arg(short = 'j', long, default_value = "2")]
        jobs_per_alumni: usize,

        /// Share of jobs created in the trash (0.0 - 1.0)
        #[arg(long, default_value = "0.1")]
        trashed: f64,
    },
    /// Clear seeded alumni and their jobs (keeps accounts)
    ClearSeed,
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let config = DatabaseConfig::from_env().unwrap_or_else(|e| fail("Invalid database configuration", e));
    let pool = init_db_pool(&config)
        .await
        .unwrap_or_else(|e| fail("Failed to connect to database", e));

    match cli.command {
        Commands::CreateAdmin {
            username,
            email,
            password,
        } => handle_create_admin(&pool, &config, username, email, password).await,
        Commands::Seed {
            alumni,
            jobs_per_alumni,
            trashed,
        } => handle_seed(&pool, alumni, jobs_per_alumni, trashed).await,
        Commands::ClearSeed => handle_clear_seed(&pool).await,
        Commands::Migrate => handle_migrate(&pool).await,
    }
}

fn fail(context: &str, err: impl Display) -> ! {
    eprintln!("\n❌ {}: {}", context, err);
    process::exit(1);
}

fn prompt_text(prompt: &str) -> String {
    Input::new()
        .with_prompt(prompt)
        .interact_text()
        .unwrap_or_else(|e| fail("Failed to read input", e))
}

async fn handle_create_admin(
    pool: &PgPool,
    config: &DatabaseConfig,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let username = username.unwrap_or_else(|| prompt_text("Username"));
    let email = email.unwrap_or_else(|| prompt_text("Email address"));
    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| fail("Failed to read password", e))
    });

    let users = PgUserStore::new(pool.clone(), config.store_timeout);

    match create_admin(&users, &username, &email, &password).await {
        Ok(admin) => {
            println!("\n✅ Admin created successfully!");
            println!("   Id: {}", admin.id);
            println!("   Username: {}", admin.username);
            println!("   Email: {}", admin.email);
        }
        Err(e) => fail("Error creating admin", e),
    }
}

async fn handle_seed(pool: &PgPool, alumni: usize, jobs_per_alumni: usize, trashed: f64) {
    let config = SeedConfig::new(alumni)
        .with_jobs_per_alumni(jobs_per_alumni)
        .with_trashed_ratio(trashed);

    if let Err(e) = seeder::seed_all(pool, config).await {
        fail("Error seeding database", e);
    }
}

async fn handle_clear_seed(pool: &PgPool) {
    if let Err(e) = seeder::clear_all(pool).await {
        fail("Error clearing seed data", e);
    }
}

async fn handle_migrate(pool: &PgPool) {
    match run_migrations(pool).await {
        Ok(()) => println!("✅ Migrations applied"),
        Err(e) => fail("Error applying migrations", e),
    }
}
