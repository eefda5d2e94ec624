//! CLI administration tool for shortlink.
//!
//! Creates, inspects and deletes short links directly against PostgreSQL,
//! and performs database maintenance without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a link with a generated code
//! cargo run --bin admin -- link create https://example.com/very/long/path
//!
//! # Create a link with a custom code that expires in one hour
//! cargo run --bin admin -- link create example.com --code promo --expires-in 3600
//!
//! # Show statistics for a code
//! cargo run --bin admin -- link stats promo
//!
//! # Delete a link
//! cargo run --bin admin -- link delete promo
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_USER`/`DB_PASSWORD`/`DB_NAME` (required)
//! - `BASE_URL`, `CODE_LENGTH` and the validation limits, as for the server

use shortlink::application::services::{LinkService, ShortenCommand};
use shortlink::config::{self, Config, mask_connection_string};
use shortlink::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing shortlink.
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
    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Create a short link
    Create {
        /// Target URL (https:// is added when no scheme is given)
        url: String,

        /// Custom short code
        #[arg(short, long)]
        code: Option<String>,

        /// Lifetime in seconds (0 or less means never expires)
        #[arg(short, long)]
        expires_in: Option<i64>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show statistics for a short code
    Stats {
        /// Short code
        code: String,
    },

    /// Delete a short link
    Delete {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL (or DB_HOST with credentials) must be set")?;

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &config, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, config: &Config, pool: &PgPool) -> Result<()> {
    let repository = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    let service = LinkService::new(repository, config.url_validator(), config.code_length);

    match action {
        LinkAction::Create {
            url,
            code,
            expires_in,
            yes,
        } => create_link(&service, config, url, code, expires_in, yes).await?,
        LinkAction::Stats { code } => show_stats(&service, code).await?,
        LinkAction::Delete { code, yes } => delete_link(&service, code, yes).await?,
    }

    Ok(())
}

/// Creates a short link after showing what will be stored.
async fn create_link(
    service: &LinkService<PgLinkRepository>,
    config: &Config,
    url: String,
    code: Option<String>,
    expires_in: Option<i64>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();
    println!("  URL:     {}", url.cyan());
    match &code {
        Some(c) => println!("  Code:    {}", c.cyan()),
        None => println!("  Code:    {}", "(generated)".bright_black()),
    }
    match expires_in {
        Some(ttl) if ttl > 0 => println!("  Expires: in {} seconds", ttl.to_string().cyan()),
        _ => println!("  Expires: {}", "never".bright_black()),
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this link?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let link = service
        .shorten(ShortenCommand {
            url,
            custom_code: code,
            ttl_seconds: expires_in,
        })
        .await?;

    let short_url = format!("{}/{}", config.base_url.trim_end_matches('/'), link.code);

    println!("{}", "✅ Link created successfully!".green().bold());
    println!();
    println!("  Short URL: {}", short_url.bright_yellow().bold());
    println!("  Target:    {}", link.target_url.cyan());
    if let Some(expires_at) = link.expires_at {
        println!(
            "  Expires:   {}",
            expires_at.format("%Y-%m-%d %H:%M:%S UTC").to_string().cyan()
        );
    }
    println!();

    Ok(())
}

/// Prints the stored record for a code.
///
/// Expired links are still shown, flagged as such.
async fn show_stats(service: &LinkService<PgLinkRepository>, code: String) -> Result<()> {
    println!("{}", "📊 Link Statistics".bright_blue().bold());
    println!();

    let stats = service.get_stats(&code).await?;

    let status = match stats.expires_at {
        Some(at) if at <= chrono::Utc::now() => "EXPIRED".red(),
        _ => "ACTIVE".green(),
    };

    println!("  Code:    {}", stats.code.cyan());
    println!("  Target:  {}", stats.target_url.bright_white());
    println!(
        "  Created: {}",
        stats
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    match stats.expires_at {
        Some(at) => println!(
            "  Expires: {}",
            at.format("%Y-%m-%d %H:%M").to_string().bright_black()
        ),
        None => println!("  Expires: {}", "never".bright_black()),
    }
    println!(
        "  Clicks:  {}",
        stats.click_count.to_string().bright_green().bold()
    );
    println!("  Status:  {}", status);
    println!();

    Ok(())
}

/// Deletes a link with confirmation prompt (default: No).
async fn delete_link(
    service: &LinkService<PgLinkRepository>,
    code: String,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑  Delete Short Link".bright_blue().bold());
    println!();

    let stats = service.get_stats(&code).await?;

    println!("  Code:   {}", stats.code.cyan());
    println!("  Target: {}", stats.target_url.bright_white());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service.delete(&code).await?;

    println!("{}", "✅ Link deleted successfully!".green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
                .fetch_one(pool)
                .await
                .unwrap_or_default();

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  Links: {}", links.to_string().bright_green().bold());
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to run migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
