//! WeRescueCats CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! wrc-cli migrate
//!
//! # Create an admin user
//! wrc-cli admin create --email admin@example.com --first-name Ada --last-name Admin --password s3cret!
//!
//! # Fill an empty database with sample users, cats and applications
//! wrc-cli seed
//!
//! # Fetch the breed catalogue from TheCatAPI
//! wrc-cli sync-breeds
//!
//! # Issue a health data API token
//! wrc-cli token create --org "Dresden Animal Clinic"
//! ```
//!
//! # Environment Variables
//!
//! - `WRC_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `CAT_API_BASE_URL`, `CAT_API_KEY` - TheCatAPI access for `seed` and `sync-breeds`

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "wrc-cli")]
#[command(author, version, about = "WeRescueCats CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Insert sample data into an empty database
    Seed,
    /// Fetch breeds from TheCatAPI
    SyncBreeds,
    /// Manage health data API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin user
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        /// Initial password (min 6 characters)
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Issue a token for an organization
    Create {
        /// Organization name
        #[arg(long)]
        org: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                first_name,
                last_name,
                password,
            } => {
                commands::admin::create_user(&email, &first_name, &last_name, &password).await?;
            }
        },
        Commands::Seed => commands::seed::run().await?,
        Commands::SyncBreeds => commands::breeds::sync().await?,
        Commands::Token { action } => match action {
            TokenAction::Create { org } => commands::token::create(&org).await?,
        },
    }
    Ok(())
}
