//! `quill invoice` - tracking invoices derived from quotes.
//!
//! The first `list` against a store with quotes but no invoices migrates
//! every saved quote into a draft invoice; after that the invoice book
//! stands on its own.

use clap::{Subcommand, ValueEnum};

use crate::error::CliResult;
use quill_core::InvoiceStatus;
use quill_store::Store;

/// CLI-facing status values, mirroring [`InvoiceStatus`].
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Draft,
    Sent,
    Paid,
}

impl From<StatusArg> for InvoiceStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Draft => InvoiceStatus::Draft,
            StatusArg::Sent => InvoiceStatus::Sent,
            StatusArg::Paid => InvoiceStatus::Paid,
        }
    }
}

#[derive(Subcommand)]
pub enum InvoiceCommand {
    /// List invoices
    List,

    /// Update an invoice's workflow status
    SetStatus {
        /// Invoice id (the originating quote's number)
        id: String,

        /// New status
        #[arg(value_enum)]
        status: StatusArg,
    },

    /// Remove an invoice by id
    Remove {
        /// Invoice id
        id: String,
    },
}

pub async fn run(store: &Store, command: InvoiceCommand) -> CliResult<()> {
    match command {
        InvoiceCommand::List => {
            let invoices = store.invoices().list().await?;
            if invoices.is_empty() {
                println!("No invoices. Save a quote first with `quill quote create`.");
                return Ok(());
            }

            for invoice in &invoices {
                println!(
                    "{}  [{}]  {}  total {}  updated {}",
                    invoice.id,
                    invoice.status.as_str(),
                    invoice.quote.client_name,
                    invoice.quote.total(),
                    invoice.updated_at.format("%Y-%m-%d %H:%M"),
                );
            }
            Ok(())
        }

        InvoiceCommand::SetStatus { id, status } => {
            store.invoices().set_status(&id, status.into()).await?;
            println!("Invoice {id} marked {}.", InvoiceStatus::from(status).as_str());
            Ok(())
        }

        InvoiceCommand::Remove { id } => {
            store.invoices().remove(&id).await?;
            println!("Invoice removed: {id}");
            Ok(())
        }
    }
}
