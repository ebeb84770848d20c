//! `quill client` - the client book.

use clap::Subcommand;

use crate::error::CliResult;
use quill_core::validation::{validate_client_name, validate_email};
use quill_core::Address;
use quill_store::Store;

#[derive(Subcommand)]
pub enum ClientCommand {
    /// Add a client with a structured address
    Add {
        /// Client or company name
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        email: String,

        /// Street line of the address
        #[arg(long)]
        street: String,

        #[arg(long)]
        city: String,

        #[arg(long)]
        state: String,

        /// ZIP code, 5 digits with optional -XXXX extension
        #[arg(long)]
        zip: String,
    },

    /// List saved clients
    List,

    /// Remove a client by id
    Remove {
        /// Client id (see `quill client list`)
        id: String,
    },
}

pub async fn run(store: &Store, command: ClientCommand) -> CliResult<()> {
    match command {
        ClientCommand::Add {
            name,
            email,
            street,
            city,
            state,
            zip,
        } => {
            validate_client_name(&name)?;
            validate_email(&email)?;

            let address = Address {
                street,
                city,
                state,
                zip_code: zip,
            };
            address.validate()?;

            let id = store.clients().add(&name, &email, &address).await?;
            println!("Client added: {id}");
            Ok(())
        }

        ClientCommand::List => {
            let clients = store.clients().list().await?;
            if clients.is_empty() {
                println!("No clients saved. Use `quill client add`.");
                return Ok(());
            }

            for client in &clients {
                let email = if client.email.is_empty() {
                    "-"
                } else {
                    &client.email
                };
                println!(
                    "{}  {}  {}  {}, {} {}",
                    client.id, client.name, email, client.city, client.state, client.pin_code,
                );
            }
            Ok(())
        }

        ClientCommand::Remove { id } => {
            store.clients().remove(&id).await?;
            println!("Client removed: {id}");
            Ok(())
        }
    }
}
