//! # Command Modules
//!
//! One module per subcommand group. Each module owns its clap types and a
//! `run` entry point taking the opened store.

pub mod client;
pub mod company;
pub mod invoice;
pub mod product;
pub mod quote;
pub mod session;

use crate::error::{CliError, CliResult};
use quill_core::Money;

/// Parses a money amount argument ("10.99", "$10.99", "10").
pub fn parse_money(input: &str) -> CliResult<Money> {
    input
        .parse::<Money>()
        .map_err(|err| CliError::invalid_argument(format!("'{input}': {err}")))
}
