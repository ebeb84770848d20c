//! `quill quote` - building, inspecting and rendering quotes.
//!
//! `create` assembles a draft in memory, runs validation through
//! `finalize()`, and only persists the snapshot if everything passes.
//! Nothing is written on a validation failure.

use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;

use crate::commands::parse_money;
use crate::error::{CliError, CliResult};
use quill_core::totals::catalog_resolver;
use quill_core::{Address, QuoteDraft};
use quill_render::{line_tax_rate, render_quote};
use quill_store::Store;

#[derive(Subcommand)]
pub enum QuoteCommand {
    /// Create a quote and save it
    Create {
        /// Take name, email and address from a saved client
        #[arg(long, conflicts_with_all = ["client_name", "street", "city", "state", "zip"])]
        client: Option<String>,

        /// Client name (when not using --client)
        #[arg(long)]
        client_name: Option<String>,

        #[arg(long, default_value = "")]
        client_email: String,

        /// Street line of the client address
        #[arg(long, default_value = "")]
        street: String,

        #[arg(long, default_value = "")]
        city: String,

        #[arg(long, default_value = "")]
        state: String,

        /// ZIP code, 5 digits with optional -XXXX extension
        #[arg(long, default_value = "")]
        zip: String,

        /// Line item as PRODUCT_ID:QTY or PRODUCT_ID:QTY:UNIT_PRICE
        /// (repeat for multiple items)
        #[arg(long = "item", value_name = "SPEC", required = true)]
        items: Vec<String>,

        /// Notes printed at the bottom of the document
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// List saved quotes
    List,

    /// Show one quote with per-line figures
    Show {
        /// Quote number, e.g. Q-1724990400000
        number: String,
    },

    /// Render a quote as an HTML document
    Render {
        /// Quote number
        number: String,

        /// Output file (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Remove a quote by number
    Remove {
        /// Quote number
        number: String,
    },
}

pub async fn run(store: &Store, command: QuoteCommand) -> CliResult<()> {
    match command {
        QuoteCommand::Create {
            client,
            client_name,
            client_email,
            street,
            city,
            state,
            zip,
            items,
            notes,
        } => create(store, client, client_name, client_email, street, city, state, zip, items, notes).await,

        QuoteCommand::List => {
            let quotes = store.quotes().list().await?;
            if quotes.is_empty() {
                println!("No quotes saved. Use `quill quote create`.");
                return Ok(());
            }

            for quote in &quotes {
                println!(
                    "{}  {}  {}  {} item(s)  total {}",
                    quote.quote_number,
                    quote.date,
                    quote.client_name,
                    quote.items.len(),
                    quote.total(),
                );
            }
            Ok(())
        }

        QuoteCommand::Show { number } => {
            let quote = store
                .quotes()
                .get(&number)
                .await?
                .ok_or_else(|| quill_store::StoreError::not_found("Quote", &number))?;
            let products = store.products().list().await?;

            println!("Quote {}", quote.quote_number);
            println!("Client:      {}", quote.client_name);
            if !quote.client_email.is_empty() {
                println!("Email:       {}", quote.client_email);
            }
            if !quote.client_address.is_empty() {
                println!("Address:     {}", quote.client_address.replace('\n', " / "));
            }
            println!("Date:        {}", quote.date);
            println!("Valid until: {}", quote.valid_until);
            println!();

            let totals =
                quill_core::totals::compute_totals(&quote.items, catalog_resolver(&products));
            for (index, item) in quote.items.iter().enumerate() {
                let line = &totals.per_line[index];
                let name =
                    quill_core::totals::product_display_name(&products, &item.product_id);
                let rate = line_tax_rate(&products, &item.product_id);
                println!(
                    "  {}. {}  {} × {}  tax {:.2}% = {}  line total {}",
                    index + 1,
                    name,
                    item.quantity,
                    item.unit_price(),
                    rate.percentage(),
                    line.line_tax,
                    line.line_total,
                );
            }
            println!();

            let split = totals.tax_split();
            println!("Subtotal: {}", totals.subtotal);
            println!("Tax:      {}  (CGST {} + SGST {})", totals.tax_total, split.cgst, split.sgst);
            println!("Total:    {}", totals.total);
            if !quote.notes.is_empty() {
                println!();
                println!("Notes: {}", quote.notes);
            }
            Ok(())
        }

        QuoteCommand::Render { number, output } => {
            let quote = store
                .quotes()
                .get(&number)
                .await?
                .ok_or_else(|| quill_store::StoreError::not_found("Quote", &number))?;
            let products = store.products().list().await?;
            let company = store.company().get().await?.unwrap_or_default();

            let html = render_quote(&company, &quote, &products);
            match output {
                Some(path) => {
                    std::fs::write(&path, html)?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{html}"),
            }
            Ok(())
        }

        QuoteCommand::Remove { number } => {
            store.quotes().remove(&number).await?;
            println!("Quote removed: {number}");
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn create(
    store: &Store,
    client: Option<String>,
    client_name: Option<String>,
    client_email: String,
    street: String,
    city: String,
    state: String,
    zip: String,
    items: Vec<String>,
    notes: String,
) -> CliResult<()> {
    let mut draft = QuoteDraft::new(Utc::now());
    draft.notes = notes;

    // Client details: from the book, or from the flags
    match client {
        Some(client_id) => {
            let client = store
                .clients()
                .get(&client_id)
                .await?
                .ok_or_else(|| quill_store::StoreError::not_found("Client", &client_id))?;
            draft.client_name = client.name.clone();
            draft.client_email = client.email.clone();
            draft.client_address = client.address();
        }
        None => {
            draft.client_name = client_name.ok_or_else(|| {
                CliError::invalid_argument("either --client or --client-name is required")
            })?;
            draft.client_email = client_email;
            draft.client_address = Address {
                street,
                city,
                state,
                zip_code: zip,
            };
        }
    }

    // Line items
    let products = store.products().list().await?;
    for spec in &items {
        let (product_id, quantity, price_override) = parse_item_spec(spec)?;

        let product = products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| quill_store::StoreError::not_found("Product", product_id))?;

        let index = draft.add_item()?;
        draft.select_product(index, product)?;
        draft.set_quantity(index, quantity)?;
        if let Some(cents) = price_override {
            draft.set_unit_price(index, cents)?;
        }
    }

    // Validation happens here; nothing is persisted on failure
    let quote = draft.finalize(catalog_resolver(&products))?;
    let number = quote.quote_number.clone();
    let total = quote.total();
    store.quotes().save(quote).await?;

    println!("Quote saved: {number}  total {total}");
    Ok(())
}

/// Parses an item spec: `PRODUCT_ID:QTY` or `PRODUCT_ID:QTY:UNIT_PRICE`.
fn parse_item_spec(spec: &str) -> CliResult<(&str, i64, Option<i64>)> {
    let mut parts = spec.splitn(3, ':');

    let product_id = parts
        .next()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| CliError::invalid_argument(format!("item '{spec}': missing product id")))?;

    let quantity = parts
        .next()
        .ok_or_else(|| CliError::invalid_argument(format!("item '{spec}': missing quantity")))?
        .parse::<i64>()
        .map_err(|_| CliError::invalid_argument(format!("item '{spec}': quantity must be a whole number")))?;

    let price_override = match parts.next() {
        Some(raw) => Some(parse_money(raw)?.cents()),
        None => None,
    };

    Ok((product_id, quantity, price_override))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_spec_basic() {
        let (id, qty, price) = parse_item_spec("p-1:3").unwrap();
        assert_eq!(id, "p-1");
        assert_eq!(qty, 3);
        assert_eq!(price, None);
    }

    #[test]
    fn test_parse_item_spec_with_price_override() {
        let (id, qty, price) = parse_item_spec("p-1:2:99.50").unwrap();
        assert_eq!(id, "p-1");
        assert_eq!(qty, 2);
        assert_eq!(price, Some(9950));
    }

    #[test]
    fn test_parse_item_spec_rejects_garbage() {
        assert!(parse_item_spec("").is_err());
        assert!(parse_item_spec("p-1").is_err());
        assert!(parse_item_spec("p-1:three").is_err());
        assert!(parse_item_spec("p-1:1:abc").is_err());
    }
}
