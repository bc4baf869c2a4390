//! Shopfront CLI - database seeding and maintenance tools.
//!
//! # Usage
//!
//! ```bash
//! # Load the bundled starter catalog (replaces existing products)
//! shop-cli seed
//!
//! # Load a custom catalog, keeping what is already there
//! shop-cli seed --file catalog.yaml --keep-existing
//!
//! # Create collection indexes
//! shop-cli indexes
//!
//! # Check connectivity and list collections
//! shop-cli ping
//! ```
//!
//! All commands read `MONGO_URI` (or `MONGODB_URI`) and the optional
//! `SHOPFRONT_DATABASE` from the environment or a `.env` file.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(author, version, about = "Shopfront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the products collection from a YAML catalog
    Seed {
        /// Catalog file (defaults to the bundled starter catalog)
        #[arg(short, long)]
        file: Option<String>,

        /// Keep existing products instead of clearing the collection first
        #[arg(long)]
        keep_existing: bool,
    },
    /// Create the collection indexes
    Indexes,
    /// Check database connectivity and list collections
    Ping,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
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
        Commands::Seed {
            file,
            keep_existing,
        } => commands::seed::products(file.as_deref(), keep_existing).await?,
        Commands::Indexes => commands::indexes::create().await?,
        Commands::Ping => commands::ping::check().await?,
    }
    Ok(())
}
