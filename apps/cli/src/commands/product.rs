//! `quill product` - catalog management.

use clap::Subcommand;

use crate::commands::parse_money;
use crate::error::CliResult;
use quill_core::validation::{validate_price_cents, validate_product_name, validate_tax_rate_bps};
use quill_core::{TaxRate, DEFAULT_HSN_SAC, DEFAULT_UNIT};
use quill_store::Store;

#[derive(Subcommand)]
pub enum ProductCommand {
    /// Add a product to the catalog
    Add {
        /// Product name shown on quote documents
        #[arg(long)]
        name: String,

        /// Unit price, e.g. 10.99 or $10.99
        #[arg(long)]
        price: String,

        /// Tax rate as a percentage (default 18)
        #[arg(long)]
        tax_rate: Option<f64>,

        /// Longer description printed under the name
        #[arg(long, default_value = "")]
        description: String,

        /// HSN/SAC classification code
        #[arg(long, default_value = DEFAULT_HSN_SAC)]
        hsn_sac: String,

        /// Unit label ("pcs", "hrs", "kg", ...)
        #[arg(long, default_value = DEFAULT_UNIT)]
        unit: String,
    },

    /// List catalog products
    List,

    /// Remove a product by id
    Remove {
        /// Product id (see `quill product list`)
        id: String,
    },
}

pub async fn run(store: &Store, command: ProductCommand) -> CliResult<()> {
    match command {
        ProductCommand::Add {
            name,
            price,
            tax_rate,
            description,
            hsn_sac,
            unit,
        } => {
            validate_product_name(&name)?;
            let price = parse_money(&price)?;
            validate_price_cents(price.cents())?;

            let tax_rate_bps = tax_rate.map(TaxRate::from_percentage).map(|r| r.bps());
            if let Some(bps) = tax_rate_bps {
                validate_tax_rate_bps(bps)?;
            }

            let id = store
                .products()
                .add(quill_core::Product {
                    id: String::new(),
                    name,
                    description,
                    hsn_sac,
                    price_cents: price.cents(),
                    unit,
                    tax_rate_bps: tax_rate_bps.unwrap_or_else(|| TaxRate::default().bps()),
                })
                .await?;

            println!("Product added: {id}");
            Ok(())
        }

        ProductCommand::List => {
            let products = store.products().list().await?;
            if products.is_empty() {
                println!("No products in the catalog. Use `quill product add`.");
                return Ok(());
            }

            for product in &products {
                println!(
                    "{}  {}  {}/{}  tax {:.2}%  hsn {}  [{}]",
                    product.id,
                    product.name,
                    product.price(),
                    product.unit,
                    product.tax_rate().percentage(),
                    product.hsn_sac,
                    if product.description.is_empty() {
                        "-"
                    } else {
                        &product.description
                    },
                );
            }
            Ok(())
        }

        ProductCommand::Remove { id } => {
            store.products().remove(&id).await?;
            println!("Product removed: {id}");
            Ok(())
        }
    }
}
