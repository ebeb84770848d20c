//! # Quill CLI
//!
//! Quotation and invoicing for small businesses.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           quill (binary)                                │
//! │                                                                         │
//! │  clap ──► commands/* ──► quill-store repositories                       │
//! │                    │                                                    │
//! │                    ├──► quill-core (drafts, totals, validation)         │
//! │                    └──► quill-render (HTML quote documents)             │
//! │                                                                         │
//! │  Data lives in the platform data directory, e.g.                        │
//! │  ~/.local/share/quill/quill.db (override with --database)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::commands::{client, company, invoice, product, quote, session};
use crate::error::{CliError, CliResult};
use quill_store::{Store, StoreConfig};

/// Quotation and invoicing for small businesses.
#[derive(Parser)]
#[command(name = "quill", version, about, long_about = None)]
struct Cli {
    /// Path to the database file (defaults to the platform data directory)
    #[arg(long, global = true, value_name = "PATH")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage the company profile printed on quote documents
    #[command(subcommand)]
    Company(company::CompanyCommand),

    /// Manage the product catalog
    #[command(subcommand)]
    Product(product::ProductCommand),

    /// Manage the client book
    #[command(subcommand)]
    Client(client::ClientCommand),

    /// Create, inspect and render quotes
    #[command(subcommand)]
    Quote(quote::QuoteCommand),

    /// Track invoices derived from quotes
    #[command(subcommand)]
    Invoice(invoice::InvoiceCommand),

    /// Login state and first-run setup flags
    #[command(subcommand)]
    Session(session::SessionCommand),
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so rendered documents can be piped from stdout.
    // Off by default; RUST_LOG=debug turns on the store's tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let path = match cli.database {
        Some(path) => path,
        None => default_database_path()?,
    };
    debug!(path = %path.display(), "Opening store");
    let store = Store::new(StoreConfig::new(path)).await?;

    match cli.command {
        Command::Company(cmd) => company::run(&store, cmd).await,
        Command::Product(cmd) => product::run(&store, cmd).await,
        Command::Client(cmd) => client::run(&store, cmd).await,
        Command::Quote(cmd) => quote::run(&store, cmd).await,
        Command::Invoice(cmd) => invoice::run(&store, cmd).await,
        Command::Session(cmd) => session::run(&store, cmd).await,
    }
}

/// Resolves the default database path under the platform data directory,
/// creating the directory on first run.
fn default_database_path() -> CliResult<PathBuf> {
    let dirs = ProjectDirs::from("com", "quill-tools", "quill").ok_or(CliError::NoDataDir)?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;
    Ok(data_dir.join("quill.db"))
}
