//! Account CLI commands
//!
//! Implements CLI commands for adding and inspecting accounts.

use clap::Subcommand;

use super::{parse_account_number, parse_amount};
use crate::display::{format_account_details, format_response};
use crate::error::LedgerResult;
use crate::services::{LedgerRequest, LedgerService, ParentChoice};

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Add an account below the parent implied by its number
    Add {
        /// Account number (e.g., 1100)
        number: String,
        /// Account label
        #[arg(required = true, num_args = 1..)]
        label: Vec<String>,
        /// Attach below this account instead of the implied parent
        #[arg(short, long, conflicts_with = "root")]
        parent: Option<String>,
        /// Start a new hierarchy with this account
        #[arg(long)]
        root: bool,
        /// Opening balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0")]
        balance: String,
    },
    /// Show account details
    Show {
        /// Account number
        number: String,
    },
}

/// Handle an account command
pub fn handle_account_command(service: &mut LedgerService, cmd: AccountCommands) -> LedgerResult<()> {
    match cmd {
        AccountCommands::Add {
            number,
            label,
            parent,
            root,
            balance,
        } => {
            let parent = match (parent, root) {
                (Some(p), _) => ParentChoice::Explicit(parse_account_number(&p)?),
                (None, true) => ParentChoice::Root,
                (None, false) => ParentChoice::Implied,
            };

            let response = service.execute(LedgerRequest::AddAccount {
                number: parse_account_number(&number)?,
                label: label.join(" "),
                balance: parse_amount(&balance)?,
                parent,
            })?;
            println!("{}", format_response(&response, service.settings()));
        }

        AccountCommands::Show { number } => {
            let summary = service.summarize(parse_account_number(&number)?)?;
            print!("{}", format_account_details(&summary, service.settings()));
        }
    }

    Ok(())
}
