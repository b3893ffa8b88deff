//! Interactive shell
//!
//! Reads one command per line and applies it to the ledger. A failing
//! command prints its error and the shell carries on; end of input or
//! `exit` leaves the shell.

use std::io::{BufRead, Write};

use super::{parse_account_number, parse_amount, parse_direction, parse_index};
use crate::display::{format_response, PostingOrder};
use crate::error::{LedgerError, LedgerResult};
use crate::models::Money;
use crate::services::{LedgerRequest, LedgerService, ParentChoice};

const PROMPT: &str = "coa> ";

const HELP: &str = "\
Commands:
  add <id> <label...> [--parent <id> | --root]   add an account
  post <id> <amount> <D|C> [memo...]             post a transaction
  delete <id> <index>                            delete a posting
  amend <id> <index> <amount> <D|C>              change a posting
  report <id> [date|amount]                      write an account report
  print                                          show every account
  search <id>                                    show one account
  help                                           show this help
  exit                                           leave the shell";

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Request(LedgerRequest),
    Help,
    Exit,
}

fn usage(text: &str) -> LedgerError {
    LedgerError::Validation(format!("usage: {}", text))
}

fn parse_add(args: &[&str]) -> LedgerResult<LedgerRequest> {
    const USAGE: &str = "add <id> <label...> [--parent <id> | --root]";
    let (number, rest) = args.split_first().ok_or_else(|| usage(USAGE))?;

    let mut label = Vec::new();
    let mut parent = ParentChoice::Implied;
    let mut tokens = rest.iter();
    while let Some(token) = tokens.next() {
        match *token {
            "--root" => parent = ParentChoice::Root,
            "--parent" => {
                let p = tokens.next().ok_or_else(|| usage(USAGE))?;
                parent = ParentChoice::Explicit(parse_account_number(p)?);
            }
            word => label.push(word),
        }
    }
    if label.is_empty() {
        return Err(usage(USAGE));
    }

    Ok(LedgerRequest::AddAccount {
        number: parse_account_number(number)?,
        label: label.join(" "),
        balance: Money::zero(),
        parent,
    })
}

/// Parse one line of shell input; blank lines parse to `None`
pub fn parse_shell_line(line: &str) -> LedgerResult<Option<ShellCommand>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((verb, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let request = match (verb.to_ascii_lowercase().as_str(), args) {
        ("help" | "?", _) => return Ok(Some(ShellCommand::Help)),
        ("exit" | "quit", _) => return Ok(Some(ShellCommand::Exit)),
        ("add", args) => parse_add(args)?,
        ("post", [number, amount, direction, memo @ ..]) => LedgerRequest::Post {
            number: parse_account_number(number)?,
            amount: parse_amount(amount)?,
            direction: parse_direction(direction)?,
            memo: (!memo.is_empty()).then(|| memo.join(" ")),
        },
        ("post", _) => return Err(usage("post <id> <amount> <D|C> [memo...]")),
        ("delete", [number, index]) => LedgerRequest::DeletePosting {
            number: parse_account_number(number)?,
            index: parse_index(index)?,
        },
        ("delete", _) => return Err(usage("delete <id> <index>")),
        ("amend", [number, index, amount, direction]) => LedgerRequest::AmendPosting {
            number: parse_account_number(number)?,
            index: parse_index(index)?,
            amount: parse_amount(amount)?,
            direction: parse_direction(direction)?,
        },
        ("amend", _) => return Err(usage("amend <id> <index> <amount> <D|C>")),
        ("report", [number, rest @ ..]) if rest.len() <= 1 => {
            let order = match rest.first().map(|s| s.to_ascii_lowercase()) {
                None => PostingOrder::Recorded,
                Some(s) if s == "date" => PostingOrder::Date,
                Some(s) if s == "amount" => PostingOrder::Amount,
                Some(_) => return Err(usage("report <id> [date|amount]")),
            };
            LedgerRequest::Report {
                number: parse_account_number(number)?,
                output: None,
                order,
            }
        }
        ("report", _) => return Err(usage("report <id> [date|amount]")),
        ("print" | "tree", []) => LedgerRequest::ShowTree,
        ("search" | "find", [number]) => LedgerRequest::Find {
            number: parse_account_number(number)?,
        },
        ("search" | "find", _) => return Err(usage("search <id>")),
        (other, _) => {
            return Err(LedgerError::Validation(format!(
                "Unknown command '{}'. Type 'help' for a list of commands",
                other
            )))
        }
    };

    Ok(Some(ShellCommand::Request(request)))
}

/// Run the shell until `exit` or end of input
pub fn run_shell<R: BufRead, W: Write>(
    service: &mut LedgerService,
    input: R,
    mut output: W,
) -> LedgerResult<()> {
    let mut lines = input.lines();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line?;

        match parse_shell_line(&line) {
            Ok(None) => {}
            Ok(Some(ShellCommand::Exit)) => break,
            Ok(Some(ShellCommand::Help)) => writeln!(output, "{}", HELP)?,
            Ok(Some(ShellCommand::Request(request))) => match service.execute(request) {
                Ok(response) => {
                    writeln!(output, "{}", format_response(&response, service.settings()))?
                }
                Err(e) => writeln!(output, "Error: {}", e)?,
            },
            Err(e) => writeln!(output, "Error: {}", e)?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::forest::{AccountForest, FixedClock, SequentialIds};
    use crate::models::{AccountNumber, Direction};
    use crate::storage::LedgerStore;
    use tempfile::TempDir;

    fn service(temp_dir: &TempDir) -> LedgerService {
        let forest = AccountForest::with_sources(
            Box::new(FixedClock::on(2024, 11, 20).unwrap()),
            Box::new(SequentialIds::default()),
        );
        LedgerService::open_with(
            forest,
            LedgerStore::new(temp_dir.path().join("accounts.txt"), "_postings"),
            Settings::default(),
            temp_dir.path().join("reports"),
        )
        .unwrap()
    }

    fn request(line: &str) -> LedgerRequest {
        match parse_shell_line(line).unwrap() {
            Some(ShellCommand::Request(request)) => request,
            other => panic!("expected a request, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_add_variants() {
        assert_eq!(
            request("add 1100 Cash On Hand"),
            LedgerRequest::AddAccount {
                number: AccountNumber::new(1100),
                label: "Cash On Hand".into(),
                balance: Money::zero(),
                parent: ParentChoice::Implied,
            }
        );
        assert!(matches!(
            request("add 5 Equity --root"),
            LedgerRequest::AddAccount {
                parent: ParentChoice::Root,
                ..
            }
        ));
        assert!(matches!(
            request("add 123 Petty --parent 12"),
            LedgerRequest::AddAccount {
                parent: ParentChoice::Explicit(p),
                ..
            } if p.get() == 12
        ));
        assert!(parse_shell_line("add 1100").is_err());
    }

    #[test]
    fn test_parse_post_with_memo() {
        assert_eq!(
            request("post 1110 20 d petty cash"),
            LedgerRequest::Post {
                number: AccountNumber::new(1110),
                amount: Money::from_cents(2000),
                direction: Direction::Debit,
                memo: Some("petty cash".into()),
            }
        );
        assert!(matches!(
            parse_shell_line("post 1110 20 X").unwrap_err(),
            LedgerError::InvalidDirection(_)
        ));
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse_shell_line("   ").unwrap(), None);
        assert_eq!(parse_shell_line("EXIT").unwrap(), Some(ShellCommand::Exit));
        assert_eq!(parse_shell_line("help").unwrap(), Some(ShellCommand::Help));
        assert_eq!(request("print"), LedgerRequest::ShowTree);
        assert!(matches!(
            request("report 1100 amount"),
            LedgerRequest::Report {
                order: PostingOrder::Amount,
                ..
            }
        ));
        assert!(parse_shell_line("report 1100 size").is_err());
        assert!(parse_shell_line("delete 1100").is_err());
        assert!(parse_shell_line("frobnicate").is_err());
    }

    #[test]
    fn test_shell_session_continues_after_errors() {
        let temp_dir = TempDir::new().unwrap();
        let mut svc = service(&temp_dir);

        let input = "\
add 1000 Assets
add 1100 Cash
add 1110 Petty
post 9999 5 D
post 1110 20 D
print
delete 1110 0
search 1000
exit
post 1110 1 D
";
        let mut output = Vec::new();
        run_shell(&mut svc, input.as_bytes(), &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("Error: Account not found: 9999"));
        assert!(output.contains("Posted P0001 to account 1110"));
        assert!(output.contains("1000 Assets 20.00\n  1100 Cash 20.00\n    1110 Petty 20.00"));
        assert!(output.contains("Deleted posting P0001"));
        assert!(output.contains("Balance:   $0.00"));
        assert_eq!(svc.forest().account(1110u64).unwrap().posting_count(), 0);
    }

    #[test]
    fn test_shell_stops_at_end_of_input() {
        let temp_dir = TempDir::new().unwrap();
        let mut svc = service(&temp_dir);
        let mut output = Vec::new();
        run_shell(&mut svc, "add 1 Assets\n".as_bytes(), &mut output).unwrap();
        assert!(svc.forest().account(1u64).is_some());
    }
}
