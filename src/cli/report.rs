//! Report CLI commands
//!
//! Per-account report files, the account tree and account lookup.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use super::parse_account_number;
use crate::display::{format_account_tree, format_response, PostingOrder};
use crate::error::LedgerResult;
use crate::services::{LedgerRequest, LedgerService};

/// Posting order for `report --sort`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportSort {
    /// As recorded
    Recorded,
    /// Oldest first
    Date,
    /// Smallest first
    Amount,
}

impl From<ReportSort> for PostingOrder {
    fn from(sort: ReportSort) -> Self {
        match sort {
            ReportSort::Recorded => PostingOrder::Recorded,
            ReportSort::Date => PostingOrder::Date,
            ReportSort::Amount => PostingOrder::Amount,
        }
    }
}

/// Arguments for `report`
#[derive(Args)]
pub struct ReportArgs {
    /// Account number
    pub number: String,
    /// Report file (defaults to the reports directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Posting order
    #[arg(short, long, value_enum, default_value = "recorded")]
    pub sort: ReportSort,
}

/// Handle `report`
pub fn handle_report_command(service: &mut LedgerService, args: ReportArgs) -> LedgerResult<()> {
    let response = service.execute(LedgerRequest::Report {
        number: parse_account_number(&args.number)?,
        output: args.output,
        order: args.sort.into(),
    })?;
    println!("{}", format_response(&response, service.settings()));
    Ok(())
}

/// Handle `tree`
pub fn handle_tree_command(service: &LedgerService) -> LedgerResult<()> {
    print!(
        "{}",
        format_account_tree(service.forest(), service.settings())
    );
    if service.forest().is_empty() {
        println!();
    }
    Ok(())
}

/// Handle `find`
pub fn handle_find_command(service: &mut LedgerService, number: &str) -> LedgerResult<()> {
    let response = service.execute(LedgerRequest::Find {
        number: parse_account_number(number)?,
    })?;
    println!("{}", format_response(&response, service.settings()));
    Ok(())
}
