//! Tiendita CLI - Database migrations and store inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Create or upgrade the invoice database
//! td-cli migrate
//!
//! # Look up invoices by name, email or phone
//! td-cli invoices search ana@x.com
//!
//! # Print one invoice as JSON
//! td-cli invoices show 123456
//!
//! # Fetch the remote catalog
//! td-cli catalog list
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `invoices` - Search and show stored invoices
//! - `catalog list` - Check the product catalog endpoint

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "td-cli")]
#[command(author, version, about = "Tiendita CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Look up stored invoices
    Invoices {
        #[command(subcommand)]
        action: InvoiceAction,
    },
    /// Inspect the remote product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum InvoiceAction {
    /// Search invoices by customer name, email or phone
    Search {
        /// Exact value to look up (case-insensitive)
        query: String,
    },
    /// Show a single invoice
    Show {
        /// Six-digit invoice number
        id: i64,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List the products the catalog currently serves
    List,
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Invoices { action } => match action {
            InvoiceAction::Search { query } => commands::invoices::search(&query).await?,
            InvoiceAction::Show { id } => commands::invoices::show(id).await?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list().await?,
        },
    }
    Ok(())
}
