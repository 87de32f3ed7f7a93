//! CLI administration tool for url-shortener.
//!
//! Provides database maintenance and inspection commands without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection and mapping counts
//! cargo run --bin admin -- db check
//!
//! # Run migrations and rebuild indexes
//! cargo run --bin admin -- db setup
//!
//! # Delete expired mappings now
//! cargo run --bin admin -- purge --yes
//!
//! # Look up a short ID
//! cargo run --bin admin -- resolve aB3dE9z
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*`), `SHORT_URL_EXPIRE_IN_SECONDS`,
//! `STORAGE_TIMEOUT_SECS`.

use url_shortener::config::{self, Config, mask_connection_string};
use url_shortener::domain::repositories::MappingRepository;
use url_shortener::infrastructure::persistence::PgMappingRepository;
use url_shortener::server::{connect_pool, prepare_schema};
use url_shortener::utils::id_generator::is_well_formed;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing url-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Delete every mapping past its TTL
    Purge {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show the live mapping for a short ID
    Resolve {
        /// Short ID to look up
        short_id: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and show mapping counts
    Check,

    /// Run migrations and rebuild indexes
    Setup,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let pool = Arc::new(connect_pool(&config).await?);
    let repo = PgMappingRepository::new(
        pool.clone(),
        config.short_url_ttl(),
        config.storage_timeout(),
    );

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &config, &pool, &repo).await?,
        Commands::Purge { yes } => purge(&repo, yes).await?,
        Commands::Resolve { short_id } => {
            if !is_well_formed(&short_id, config.short_id_length) {
                println!(
                    "{}",
                    format!(
                        "⚠️  '{}' is not a {}-character alphanumeric ID",
                        short_id, config.short_id_length
                    )
                    .yellow()
                );
            }
            resolve(&repo, &short_id).await?
        }
    }

    pool.close().await;

    Ok(())
}

/// Handles database diagnostic and setup commands.
async fn handle_db_action(
    action: DbAction,
    config: &Config,
    pool: &sqlx::PgPool,
    repo: &PgMappingRepository,
) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());
            println!(
                "  Database: {}",
                mask_connection_string(&config.database_url).bright_black()
            );

            repo.ping()
                .await
                .map_err(|e| anyhow::anyhow!("Ping failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!();

            let (total, live) = repo
                .counts()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count mappings: {}", e))?;

            println!(
                "  Mappings:      {}",
                total.to_string().bright_white().bold()
            );
            println!("  Live:          {}", live.to_string().bright_green().bold());
            println!(
                "  Expired:       {}",
                (total - live).to_string().yellow().bold()
            );
            println!(
                "  TTL:           {}s",
                config.short_url_ttl_seconds.to_string().bright_white()
            );
            println!();
        }
        DbAction::Setup => {
            println!("{}", "🛠  Preparing schema...".bright_blue());

            prepare_schema(pool, repo).await?;

            println!("{}", "✅ Migrations applied, indexes rebuilt".green().bold());
        }
    }

    Ok(())
}

/// Runs one expiry sweep, asking for confirmation unless `skip_confirm`.
async fn purge(repo: &PgMappingRepository, skip_confirm: bool) -> Result<()> {
    println!("{}", "🧹 Purge expired mappings".bright_blue().bold());
    println!();

    let (total, live) = repo
        .counts()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count mappings: {}", e))?;
    let expired = total - live;

    if expired == 0 {
        println!("{}", "  Nothing to purge".yellow());
        return Ok(());
    }

    println!(
        "  {} expired mapping(s) will be deleted",
        expired.to_string().bright_white().bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete them now?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let removed = delete_expired(repo).await?;

    println!();
    println!(
        "{} {}",
        "✅ Removed".green().bold(),
        removed.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Deletes expired mappings, failing loudly on storage errors.
async fn delete_expired(repo: &dyn MappingRepository) -> Result<u64> {
    repo.purge_expired()
        .await
        .map_err(|e| anyhow::anyhow!("Purge failed: {}", e))
}

/// Prints the live mapping for `short_id`, if any.
async fn resolve(repo: &PgMappingRepository, short_id: &str) -> Result<()> {
    let mapping = repo
        .find_live(short_id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("No live mapping for this short ID")?;

    println!("  Short ID:  {}", mapping.short_id.cyan());
    println!("  URL:       {}", mapping.original_url.bright_white());
    println!(
        "  Created:   {}",
        mapping
            .last_modified
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!(
        "  Expires:   {}",
        mapping
            .expires_at(repo.ttl())
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );

    Ok(())
}
