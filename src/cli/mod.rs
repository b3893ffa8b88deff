//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the ledger service. The interactive shell in
//! [`shell`] turns typed lines into the same service requests.

pub mod account;
pub mod posting;
pub mod report;
pub mod shell;

pub use account::{handle_account_command, AccountCommands};
pub use posting::{
    handle_amend_command, handle_delete_command, handle_post_command, AmendArgs, DeleteArgs,
    PostArgs,
};
pub use report::{handle_find_command, handle_report_command, handle_tree_command, ReportArgs, ReportSort};
pub use shell::run_shell;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountNumber, Direction, Money};

/// Parse an account number typed by the user
pub fn parse_account_number(s: &str) -> LedgerResult<AccountNumber> {
    s.parse::<AccountNumber>().map_err(|_| {
        LedgerError::Validation(format!(
            "Invalid account number: '{}'. Use a positive whole number like 1100",
            s
        ))
    })
}

/// Parse a posting amount typed by the user
pub fn parse_amount(s: &str) -> LedgerResult<Money> {
    Money::parse(s).map_err(|e| {
        LedgerError::Validation(format!(
            "Invalid amount: '{}'. Use format like '20.00' or '20'. Error: {}",
            s, e
        ))
    })
}

/// Parse a direction symbol typed by the user
pub fn parse_direction(s: &str) -> LedgerResult<Direction> {
    s.parse::<Direction>()
}

/// Parse a posting index typed by the user
pub fn parse_index(s: &str) -> LedgerResult<usize> {
    s.parse::<usize>().map_err(|_| {
        LedgerError::Validation(format!(
            "Invalid posting index: '{}'. Use the number shown in the account report",
            s
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_account_number("1100").unwrap().get(), 1100);
        assert!(parse_account_number("0").is_err());
        assert!(parse_account_number("11a").is_err());

        assert_eq!(parse_amount("20.5").unwrap().cents(), 2050);
        assert!(parse_amount("twenty").is_err());

        assert_eq!(parse_direction("c").unwrap(), Direction::Credit);
        assert!(matches!(
            parse_direction("x").unwrap_err(),
            LedgerError::InvalidDirection(_)
        ));

        assert_eq!(parse_index("3").unwrap(), 3);
        assert!(parse_index("-1").is_err());
    }
}
