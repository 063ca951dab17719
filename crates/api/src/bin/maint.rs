//! `repairdesk-maint`: one-off maintenance tasks run against the database and
//! the logo bucket.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use repairdesk_api::auth::password::hash_password;
use repairdesk_api::storage::LogoStore;
use repairdesk_core::validation::{synthetic_email, validate_password};
use repairdesk_db::repositories::{IdentityRepo, SessionRepo};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "repairdesk-maint")]
#[command(about = "Maintenance tasks for a RepairDesk deployment")]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    /// Directory holding the storage buckets
    #[arg(long, env = "STORAGE_ROOT", default_value = "storage", global = true)]
    storage_root: PathBuf,

    /// Origin used in public object URLs
    #[arg(
        long,
        env = "PUBLIC_BASE_URL",
        default_value = "http://localhost:3000",
        global = true
    )]
    public_base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Re-hash the password of an identity
    ResetPassword {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Print every identity id and email
    ListIdentities,
    /// Delete revoked and expired refresh sessions
    PurgeSessions,
    /// Move nested logo objects to the name of their first path segment
    NormalizeLogos,
    /// Copy a local backup directory into the logo bucket (overwriting)
    ImportLogos {
        #[arg(long)]
        from: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "repairdesk_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let logos = LogoStore::new(&cli.storage_root, &cli.public_base_url);

    match cli.command {
        Command::ResetPassword { username, password } => {
            validate_password(&password)?;
            let pool = connect(cli.database_url.as_deref()).await?;
            let email = synthetic_email(&username);
            let identity = IdentityRepo::find_by_email(&pool, &email)
                .await?
                .with_context(|| format!("No identity for username '{username}'"))?;
            let hashed = hash_password(&password)
                .map_err(|e| anyhow::anyhow!("Password hashing error: {e}"))?;
            IdentityRepo::update_password(&pool, identity.id, &hashed).await?;
            println!("Password reset for {email} ({})", identity.id);
        }
        Command::ListIdentities => {
            let pool = connect(cli.database_url.as_deref()).await?;
            for identity in IdentityRepo::list(&pool).await? {
                println!("{}\t{}", identity.id, identity.email);
            }
        }
        Command::PurgeSessions => {
            let pool = connect(cli.database_url.as_deref()).await?;
            let purged = SessionRepo::purge_stale(&pool).await?;
            println!("{purged} session(s) purged");
        }
        Command::NormalizeLogos => {
            let pool = connect(cli.database_url.as_deref()).await?;
            let moved = logos.flatten().await?;
            for object in &moved {
                println!("{} -> {}", object.from, object.to);
            }
            let relinked = logos.relink_showrooms(&pool, &moved).await?;
            println!(
                "{} object(s) flattened, {relinked} showroom logo(s) relinked",
                moved.len()
            );
        }
        Command::ImportLogos { from } => {
            let imported = logos
                .import_dir(&from)
                .await
                .with_context(|| format!("Failed to import from {}", from.display()))?;
            for name in &imported {
                println!("{name}");
            }
            println!("{} object(s) imported into {}", imported.len(), logos.dir().display());
        }
    }

    Ok(())
}

async fn connect(database_url: Option<&str>) -> Result<repairdesk_db::DbPool> {
    let url = database_url.context("DATABASE_URL must be set")?;
    repairdesk_db::create_pool(url)
        .await
        .context("Failed to connect to database")
}
