//! CLI administration tool for linklet.
//!
//! Provides commands for managing accounts, viewing statistics, and checking
//! the database without going through the HTTP surface.
//!
//! # Usage
//!
//! ```bash
//! # Create an account
//! cargo run --bin admin -- account create --email ops@example.com
//!
//! # List accounts
//! cargo run --bin admin -- account list
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `SESSION_SECRET` (required for `account create`): password hashing key

use linklet::application::services::AccountService;
use linklet::infrastructure::persistence::PgAccountRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing linklet.
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
    /// Manage user accounts
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Account management subcommands.
#[derive(Subcommand)]
enum AccountAction {
    /// Create a new account
    Create {
        /// Account email
        #[arg(short, long)]
        email: Option<String>,

        /// Password (prompted interactively if not provided)
        #[arg(short, long)]
        password: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all accounts
    List,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Account { action } => handle_account_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches account management commands.
async fn handle_account_action(action: AccountAction, pool: &PgPool) -> Result<()> {
    match action {
        AccountAction::Create {
            email,
            password,
            yes,
        } => {
            create_account(pool, email, password, yes).await?;
        }
        AccountAction::List => {
            list_accounts(pool).await?;
        }
    }

    Ok(())
}

async fn create_account(
    pool: &PgPool,
    email: Option<String>,
    password: Option<String>,
    yes: bool,
) -> Result<()> {
    let secret = std::env::var("SESSION_SECRET").context("SESSION_SECRET must be set")?;

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let password = match password {
        Some(p) => p,
        None => Input::new().with_prompt("Password").interact_text()?,
    };

    if !yes {
        let proceed = Confirm::new()
            .with_prompt(format!("Create account '{}'?", email))
            .default(true)
            .interact()?;
        if !proceed {
            println!("{}", "Aborted.".yellow());
            return Ok(());
        }
    }

    let repository = Arc::new(PgAccountRepository::new(Arc::new(pool.clone())));
    let service = AccountService::new(repository, secret);

    let account = service
        .register(email, password)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    println!(
        "{} account {} (id {})",
        "Created".green().bold(),
        account.email.bold(),
        account.id
    );

    Ok(())
}

async fn list_accounts(pool: &PgPool) -> Result<()> {
    let rows = sqlx::query_as::<_, (i64, String, chrono::DateTime<chrono::Utc>)>(
        "SELECT id, email, created_at FROM accounts ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;

    if rows.is_empty() {
        println!("{}", "No accounts.".yellow());
        return Ok(());
    }

    println!("{}", "Accounts:".bold());
    for (id, email, created_at) in rows {
        println!(
            "  {:>5}  {}  {}",
            id,
            email,
            created_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
        );
    }

    Ok(())
}

/// Prints link, account, and click counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    let accounts = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts")
        .fetch_one(pool)
        .await?;
    let links = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;
    // SUM(bigint) comes back as NUMERIC, hence the cast.
    let clicks =
        sqlx::query_scalar::<_, i64>("SELECT COALESCE(SUM(click_count), 0)::BIGINT FROM links")
            .fetch_one(pool)
            .await?;
    let renamed = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM links WHERE active_code <> auto_code",
    )
    .fetch_one(pool)
    .await?;

    println!("{}", "Statistics:".bold());
    println!("  Accounts:      {}", accounts.to_string().cyan());
    println!("  Links:         {}", links.to_string().cyan());
    println!("  Renamed links: {}", renamed.to_string().cyan());
    println!("  Total clicks:  {}", clicks.to_string().cyan());

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await?;
            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            let version = sqlx::query_scalar::<_, String>("SELECT version()")
                .fetch_one(pool)
                .await?;
            let size = sqlx::query_scalar::<_, String>(
                "SELECT pg_size_pretty(pg_database_size(current_database()))",
            )
            .fetch_one(pool)
            .await?;

            println!("{}", "Database info:".bold());
            println!("  Server: {}", version);
            println!("  Size:   {}", size);
        }
    }

    Ok(())
}
