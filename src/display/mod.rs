//! Display formatting for terminal output
//!
//! Turns forest contents and service responses into text for the terminal.

pub mod account;
pub mod report;

pub use account::{format_account_details, format_account_tree};
pub use report::{format_account_report, PostingOrder};

use crate::config::Settings;
use crate::services::ledger::LedgerResponse;

/// One-line confirmation (or the full view) for a service response
pub fn format_response(response: &LedgerResponse, settings: &Settings) -> String {
    match response {
        LedgerResponse::AccountAdded { number, level } => {
            format!("Added account {} at level {}", number, level)
        }
        LedgerResponse::Posted { number, posting } => {
            format!("Posted {} to account {}", posting, number)
        }
        LedgerResponse::PostingDeleted { number, posting } => format!(
            "Deleted posting {} ({} {}) from account {}",
            posting.id,
            posting.amount().format_with_symbol(&settings.currency_symbol),
            posting.direction,
            number
        ),
        LedgerResponse::PostingAmended { number, previous } => format!(
            "Amended posting {} on account {} (was {} {})",
            previous.id,
            number,
            previous.amount().format_with_symbol(&settings.currency_symbol),
            previous.direction
        ),
        LedgerResponse::ReportWritten { number, path } => {
            format!("Report for account {} written to {}", number, path.display())
        }
        LedgerResponse::Tree(rendered) => {
            if rendered.is_empty() {
                "No accounts found.".to_string()
            } else {
                rendered.trim_end().to_string()
            }
        }
        LedgerResponse::Found(summary) => format_account_details(summary, settings)
            .trim_end()
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountNumber, PostingId};

    #[test]
    fn test_format_response() {
        let settings = Settings::default();
        let posted = LedgerResponse::Posted {
            number: AccountNumber::new(1110),
            posting: PostingId::new("P0001"),
        };
        assert_eq!(format_response(&posted, &settings), "Posted P0001 to account 1110");

        let empty = LedgerResponse::Tree(String::new());
        assert_eq!(format_response(&empty, &settings), "No accounts found.");
    }
}
