//! CLI administration tool for url-redirector.
//!
//! Provides commands for managing user accounts, issuing API tokens, and
//! seeding redirect rules without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a user
//! cargo run --bin admin -- user create --username alice
//!
//! # Issue an API token for a user
//! cargo run --bin admin -- token issue --username alice
//!
//! # List / revoke tokens
//! cargo run --bin admin -- token list
//! cargo run --bin admin -- token revoke 3
//!
//! # Seed redirect rules from a JSON fixture
//! cargo run --bin admin -- seed --username alice --file fixtures/redirect_rules.json
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` (required): HMAC key matching the server's

use url_redirector::application::services::{AuthService, RuleService, hash_password};
use url_redirector::domain::entities::{NewUser, Principal};
use url_redirector::domain::repositories::{TokenRepository, UserRepository};
use url_redirector::infrastructure::persistence::{
    PgRuleRepository, PgTokenRepository, PgUserRepository,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::Deserialize;
use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;

/// Raw API token length in characters.
const TOKEN_LENGTH: usize = 48;

/// CLI tool for managing url-redirector.
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
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Seed redirect rules from a JSON fixture file
    Seed {
        /// Username who will own the rules (created if missing)
        #[arg(short, long)]
        username: String,

        /// Path to JSON file with redirect rules
        #[arg(short, long, default_value = "fixtures/redirect_rules.json")]
        file: PathBuf,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new user account
    Create {
        /// Username for the new account
        #[arg(short, long)]
        username: Option<String>,

        /// Grant administrator privileges
        #[arg(long)]
        admin: bool,
    },
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Issue a new API token for a user
    Issue {
        /// Username the token belongs to
        #[arg(short, long)]
        username: String,

        /// Token name (e.g., "CI", "Laptop")
        #[arg(short, long)]
        name: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token by id
    Revoke {
        /// Token id to revoke
        id: i64,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Token { action } => handle_token_action(action, &pool).await?,
        Commands::Seed { username, file } => seed_rules(&pool, &username, &file).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn signing_secret() -> Result<String> {
    std::env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));

    match action {
        UserAction::Create { username, admin } => {
            create_user(repo, username, admin).await?;
        }
    }

    Ok(())
}

/// Creates a user account with interactive prompts.
async fn create_user(
    repo: Arc<PgUserRepository>,
    username: Option<String>,
    admin: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let password: String = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    let secret = signing_secret()?;

    let user = repo
        .create(NewUser {
            username,
            password_hash: hash_password(&secret, &password),
            is_admin: admin,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!("{}", "✅ User created successfully!".green().bold());
    println!("  ID:       {}", user.id.to_string().bright_white());
    println!("  Username: {}", user.username.cyan());
    if user.is_admin {
        println!("  Role:     {}", "ADMIN".bright_yellow().bold());
    }
    println!();

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: &PgPool) -> Result<()> {
    let pool_arc = Arc::new(pool.clone());
    let token_repo = Arc::new(PgTokenRepository::new(pool_arc.clone()));
    let user_repo = Arc::new(PgUserRepository::new(pool_arc));

    match action {
        TokenAction::Issue {
            username,
            name,
            yes,
        } => {
            issue_token(token_repo, user_repo, username, name, yes).await?;
        }
        TokenAction::List => {
            list_tokens(token_repo).await?;
        }
        TokenAction::Revoke { id } => {
            revoke_token(token_repo, id).await?;
        }
    }

    Ok(())
}

/// Issues a new API token for a user.
///
/// # Security
///
/// - Only the HMAC-SHA256 hash is stored in the database
/// - The raw token is displayed once and cannot be retrieved later
async fn issue_token(
    token_repo: Arc<PgTokenRepository>,
    user_repo: Arc<PgUserRepository>,
    username: String,
    name: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Issue API Token".bright_blue().bold());
    println!();

    let user = user_repo
        .find_by_username(&username)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to look up user: {}", e))?
        .with_context(|| format!("No such user: {username}"))?;

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("API access")
            .interact_text()?,
    };

    let token_value = generate_token();

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  User:  {}", user.username.cyan());
    println!("  Name:  {}", token_name.cyan());
    println!("  Token: {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Issue this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let auth = AuthService::new(token_repo.clone(), signing_secret()?);
    let token_hash = auth.hash_token(&token_value);

    token_repo
        .create_token(user.id, &token_name, &token_hash)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))?;

    println!();
    println!("{}", "✅ Token issued successfully!".green().bold());
    println!();
    println!("{}", "Add this to your requests:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        token_value.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all API tokens with status indicators.
async fn list_tokens(repo: Arc<PgTokenRepository>) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Issue one with: {} admin token issue --username <user>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<6} {:<24} {:<18} {:<10}",
        "ID".bright_white().bold(),
        "User".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(68).bright_black());

    for token in &tokens {
        let status = if token.revoked_at.is_some() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<4} {:<6} {:<24} {:<18} {}",
            token.id.to_string().bright_black(),
            token.user_id.to_string().bright_black(),
            token.name.cyan(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!("  Total: {}", tokens.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Revokes a token by id with a confirmation prompt.
async fn revoke_token(repo: Arc<PgTokenRepository>, id: i64) -> Result<()> {
    println!("{}", "🚫 Revoke API Token".bright_blue().bold());
    println!();

    let confirmed = Confirm::new()
        .with_prompt(format!("Revoke token {id}?"))
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.revoke_token(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!("{}", "✅ Token revoked".green().bold());

    Ok(())
}

#[derive(Deserialize)]
struct SeedFile {
    redirect_rules: Vec<SeedRule>,
}

#[derive(Deserialize)]
struct SeedRule {
    redirect_url: String,
    #[serde(default)]
    is_private: bool,
}

/// Loads redirect rules from a JSON fixture file.
///
/// Creates the owning user if it does not exist (with a random password that
/// is printed once) and runs each rule through the regular creation path, so
/// validation and identifier collision retry apply.
async fn seed_rules(pool: &PgPool, username: &str, file: &PathBuf) -> Result<()> {
    println!("{}", "🌱 Seed Redirect Rules".bright_blue().bold());
    println!();

    let content = std::fs::read_to_string(file)
        .with_context(|| format!("File not found: {}", file.display()))?;
    let seed: SeedFile = serde_json::from_str(&content)
        .with_context(|| format!("Invalid fixture file: {}", file.display()))?;

    let pool_arc = Arc::new(pool.clone());
    let user_repo = Arc::new(PgUserRepository::new(pool_arc.clone()));
    let rule_service = RuleService::new(Arc::new(PgRuleRepository::new(pool_arc)));

    let user = match user_repo.find_by_username(username).await? {
        Some(user) => user,
        None => {
            let password: String = generate_token();
            let secret = signing_secret()?;
            let user = user_repo
                .create(NewUser {
                    username: username.to_string(),
                    password_hash: hash_password(&secret, &password),
                    is_admin: false,
                })
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

            println!("  Created user {} (password: {})", username.cyan(), password.bright_yellow());
            user
        }
    };

    let principal = Principal {
        user_id: user.id,
        username: user.username.clone(),
        is_admin: user.is_admin,
    };

    let mut created = 0;
    for rule in seed.redirect_rules {
        let created_rule = rule_service
            .create_rule(&principal, rule.redirect_url, rule.is_private)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create rule: {}", e))?;

        println!(
            "  {} {} -> {}",
            "+".green(),
            created_rule.identifier.bright_yellow(),
            created_rule.redirect_url
        );
        created += 1;
    }

    println!();
    println!(
        "{}",
        format!("✅ Successfully created {created} redirect rules")
            .green()
            .bold()
    );

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            sqlx::query("SELECT 1")
                .execute(pool)
                .await
                .context("Database check failed")?;
            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}

/// Generates a random alphanumeric token.
fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}
