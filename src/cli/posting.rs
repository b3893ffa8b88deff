//! Posting CLI commands
//!
//! Post, delete and amend transactions on an account.

use clap::Args;

use super::{parse_account_number, parse_amount, parse_direction};
use crate::display::format_response;
use crate::error::LedgerResult;
use crate::services::{LedgerRequest, LedgerService};

/// Arguments for `post`
#[derive(Args)]
pub struct PostArgs {
    /// Account number
    pub number: String,
    /// Amount (e.g., "20.00"); never negative
    pub amount: String,
    /// D for debit, C for credit
    pub direction: String,
    /// Memo
    #[arg(short, long)]
    pub memo: Option<String>,
}

/// Arguments for `delete-posting`
#[derive(Args)]
pub struct DeleteArgs {
    /// Account number
    pub number: String,
    /// Posting index as shown in the account report
    pub index: usize,
}

/// Arguments for `amend-posting`
#[derive(Args)]
pub struct AmendArgs {
    /// Account number
    pub number: String,
    /// Posting index as shown in the account report
    pub index: usize,
    /// New amount
    pub amount: String,
    /// New direction, D or C
    pub direction: String,
}

/// Handle `post`
pub fn handle_post_command(service: &mut LedgerService, args: PostArgs) -> LedgerResult<()> {
    let response = service.execute(LedgerRequest::Post {
        number: parse_account_number(&args.number)?,
        amount: parse_amount(&args.amount)?,
        direction: parse_direction(&args.direction)?,
        memo: args.memo,
    })?;
    println!("{}", format_response(&response, service.settings()));
    Ok(())
}

/// Handle `delete-posting`
pub fn handle_delete_command(service: &mut LedgerService, args: DeleteArgs) -> LedgerResult<()> {
    let response = service.execute(LedgerRequest::DeletePosting {
        number: parse_account_number(&args.number)?,
        index: args.index,
    })?;
    println!("{}", format_response(&response, service.settings()));
    Ok(())
}

/// Handle `amend-posting`
pub fn handle_amend_command(service: &mut LedgerService, args: AmendArgs) -> LedgerResult<()> {
    let response = service.execute(LedgerRequest::AmendPosting {
        number: parse_account_number(&args.number)?,
        index: args.index,
        amount: parse_amount(&args.amount)?,
        direction: parse_direction(&args.direction)?,
    })?;
    println!("{}", format_response(&response, service.settings()));
    Ok(())
}
