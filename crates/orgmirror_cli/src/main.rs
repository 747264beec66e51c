//! Orgmirror CLI - command-line interface for the organization mirror.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "orgmirror")]
#[command(version)]
#[command(about = "Mirrors code-host organizations into a local database")]
#[command(
    long_about = "Orgmirror keeps a local database of organizations from a code hosting \
platform in sync with the remote: it heals renames, resolves login collisions, \
relinks repository ownership, and fans out repository creation jobs."
)]
#[command(after_long_help = r#"EXAMPLES
    Apply the database schema:
        $ orgmirror migrate up

    Sync organizations by login or numeric id:
        $ orgmirror sync rails 183456

ENVIRONMENT VARIABLES
    ORGMIRROR_DATABASE_URL    Database connection string
    ORGMIRROR_GITHUB_TOKEN    GitHub personal access token
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Sync one or more GitHub organizations
    #[cfg(feature = "github")]
    Sync {
        /// Organization logins or numeric ids - can specify multiple
        #[arg(required = true)]
        orgs: Vec<String>,
    },
}

#[derive(Subcommand)]
enum MigrateAction {
    /// Apply all pending migrations
    Up,
    /// Rollback the last migration
    Down,
    /// Show migration status
    Status,
    /// Fresh install - drop all tables and reapply migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("orgmirror=info,orgmirror_cli=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let config = config::Config::load();
    let cli = Cli::parse();

    let database_url = config.database_url();

    // Ensure the database directory exists for SQLite
    if database_url.starts_with("sqlite://") {
        let db_path = database_url.trim_start_matches("sqlite://");
        // Strip query parameters (e.g., ?mode=rwc) before path operations
        let db_path = db_path.split('?').next().unwrap_or(db_path);
        if let Some(parent) = std::path::Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    match cli.command {
        Commands::Migrate { action } => {
            commands::migrate::handle_migrate(action, &database_url).await?;
        }
        #[cfg(feature = "github")]
        Commands::Sync { orgs } => {
            commands::sync::handle_sync(orgs, &config, &database_url).await?;
        }
    }

    Ok(())
}
