//! `quill company` - the profile printed in the quote header.

use clap::Subcommand;

use crate::error::{CliError, CliResult};
use quill_core::{Address, Company};
use quill_store::Store;

#[derive(Subcommand)]
pub enum CompanyCommand {
    /// Save the company profile (replaces the existing one)
    Set {
        /// Company name
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "")]
        website: String,

        /// Tax identification number printed in the document footer
        #[arg(long, default_value = "")]
        tax_id: String,

        /// Street line of the address
        #[arg(long, default_value = "")]
        street: String,

        #[arg(long, default_value = "")]
        city: String,

        #[arg(long, default_value = "")]
        state: String,

        /// ZIP code, 5 digits with optional -XXXX extension
        #[arg(long, default_value = "")]
        zip: String,
    },

    /// Print the saved company profile
    Show,
}

pub async fn run(store: &Store, command: CompanyCommand) -> CliResult<()> {
    match command {
        CompanyCommand::Set {
            name,
            email,
            phone,
            website,
            tax_id,
            street,
            city,
            state,
            zip,
        } => {
            let address = Address {
                street,
                city,
                state,
                zip_code: zip,
            };
            if !address.is_empty() {
                address.validate().map_err(CliError::Validation)?;
            }

            store
                .company()
                .save(Company {
                    name,
                    email,
                    phone,
                    website,
                    tax_id,
                    address,
                    legacy_address: None,
                })
                .await?;

            println!("Company profile saved.");
            Ok(())
        }

        CompanyCommand::Show => {
            match store.company().get().await? {
                Some(company) => {
                    println!("{}", company.name);
                    let address = company.display_address();
                    if !address.is_empty() {
                        println!("{address}");
                    }
                    if !company.phone.is_empty() {
                        println!("Phone:   {}", company.phone);
                    }
                    if !company.email.is_empty() {
                        println!("Email:   {}", company.email);
                    }
                    if !company.website.is_empty() {
                        println!("Website: {}", company.website);
                    }
                    if !company.tax_id.is_empty() {
                        println!("Tax ID:  {}", company.tax_id);
                    }
                }
                None => println!("No company profile saved yet. Use `quill company set`."),
            }
            Ok(())
        }
    }
}
