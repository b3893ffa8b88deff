//! Line codecs for the account source and the posting log
//!
//! Account source, one account per line:
//!
//! ```text
//! 1000 Assets 20.00
//! 1100 Cash On Hand 20.00
//! ```
//!
//! The first token is the id, the last token is the balance and everything
//! in between is the label.
//!
//! Posting log, one posting per line:
//!
//! ```text
//! 1110|T20241120093000000-0|20.00|D|2024-11-20|petty cash top-up
//! ```
//!
//! The memo is the remainder of the line and may itself contain `|`.

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountNumber, AccountRecord, Direction, Money, Posting, PostingId};

/// Date format used in the posting log
pub const POSTING_DATE_FORMAT: &str = "%Y-%m-%d";

const FIELD_SEPARATOR: char = '|';

fn parse_error(line: usize, reason: impl Into<String>) -> LedgerError {
    LedgerError::Parse {
        line,
        reason: reason.into(),
    }
}

/// Parse one account line. Blank lines yield `Ok(None)`.
pub fn parse_account_line(line_no: usize, line: &str) -> LedgerResult<Option<AccountRecord>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(None);
    }
    if tokens.len() < 2 {
        return Err(parse_error(line_no, "expected '<id> <label> <balance>'"));
    }

    let number: AccountNumber = tokens[0]
        .parse()
        .map_err(|_| parse_error(line_no, format!("invalid account id '{}'", tokens[0])))?;

    let balance_token = tokens[tokens.len() - 1];
    let balance = Money::parse(balance_token)
        .map_err(|e| parse_error(line_no, format!("invalid balance '{}': {}", balance_token, e)))?;

    let label = tokens[1..tokens.len() - 1].join(" ");
    Ok(Some(AccountRecord::new(number, label, balance)))
}

/// Render one account line
pub fn format_account_line(record: &AccountRecord) -> String {
    if record.label.is_empty() {
        format!("{} {}", record.number, record.balance.to_plain_string())
    } else {
        format!(
            "{} {} {}",
            record.number,
            record.label,
            record.balance.to_plain_string()
        )
    }
}

/// Parse one posting line. Blank lines yield `Ok(None)`.
pub fn parse_posting_line(
    line_no: usize,
    line: &str,
) -> LedgerResult<Option<(AccountNumber, Posting)>> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = line.splitn(6, FIELD_SEPARATOR).collect();
    if fields.len() < 5 {
        return Err(parse_error(
            line_no,
            format!("expected at least 5 fields, found {}", fields.len()),
        ));
    }

    let number: AccountNumber = fields[0]
        .trim()
        .parse()
        .map_err(|_| parse_error(line_no, format!("invalid account id '{}'", fields[0])))?;

    let id = fields[1].trim();
    if id.is_empty() {
        return Err(parse_error(line_no, "missing posting id"));
    }

    let amount = Money::parse(fields[2])
        .map_err(|e| parse_error(line_no, format!("invalid amount '{}': {}", fields[2], e)))?;

    let direction = Direction::parse(fields[3])
        .ok_or_else(|| parse_error(line_no, format!("invalid direction '{}'", fields[3])))?;

    let date = NaiveDate::parse_from_str(fields[4].trim(), POSTING_DATE_FORMAT)
        .map_err(|e| parse_error(line_no, format!("invalid date '{}': {}", fields[4], e)))?;

    let memo = fields.get(5).copied().unwrap_or_default();

    Ok(Some((
        number,
        Posting::with_memo(PostingId::new(id), amount, direction, date, memo),
    )))
}

/// Render one posting line
pub fn format_posting_line(number: AccountNumber, posting: &Posting) -> String {
    let memo: String = posting
        .memo
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    format!(
        "{}|{}|{}|{}|{}|{}",
        number,
        posting.id,
        posting.amount().to_plain_string(),
        posting.direction.symbol(),
        posting.date.format(POSTING_DATE_FORMAT),
        memo
    )
}
