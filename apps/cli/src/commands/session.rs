//! `quill session` - login and setup flags.
//!
//! Not a security boundary. The flags gate nothing by force; they exist
//! so scripts and the first-run flow can check where the user is.

use clap::Subcommand;

use crate::error::CliResult;
use quill_core::validation::validate_email;
use quill_store::Store;

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Mark the session as logged in
    Login {
        /// Email to record on the session
        email: String,
    },

    /// Clear the logged-in flag (setup state is kept)
    Logout,

    /// Print the current session state
    Status,

    /// Mark first-run setup as complete
    CompleteSetup,
}

pub async fn run(store: &Store, command: SessionCommand) -> CliResult<()> {
    match command {
        SessionCommand::Login { email } => {
            validate_email(&email)?;
            store.session().login(&email).await?;
            println!("Logged in as {email}.");
            Ok(())
        }

        SessionCommand::Logout => {
            store.session().logout().await?;
            println!("Logged out.");
            Ok(())
        }

        SessionCommand::Status => {
            let session = store.session().get().await?;
            match (session.is_authenticated, session.user_email) {
                (true, Some(email)) => println!("Logged in as {email}."),
                (true, None) => println!("Logged in."),
                _ => println!("Logged out."),
            }
            println!(
                "Setup: {}",
                if session.setup_complete {
                    "complete"
                } else {
                    "not complete"
                }
            );
            Ok(())
        }

        SessionCommand::CompleteSetup => {
            store.session().mark_setup_complete().await?;
            println!("Setup marked complete.");
            Ok(())
        }
    }
}
