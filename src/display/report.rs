//! Per-account report
//!
//! A report shows one account's header line, the accounts below it and its
//! postings:
//!
//! ```text
//! 1100 Cash $20.00
//! Sub-accounts:
//!   1110 Petty $20.00
//! Transactions:
//!   #0  T20241120093000000-0  $20.00  Debit  2024-11-20  top-up
//! ```

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::forest::AccountForest;
use crate::models::{AccountNumber, Posting};

/// Order in which a report lists postings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostingOrder {
    /// As recorded on the account
    #[default]
    Recorded,
    /// Oldest first
    Date,
    /// Smallest first
    Amount,
}

impl PostingOrder {
    /// Postings paired with their index on the account, in this order
    pub fn arrange<'a>(&self, postings: &'a [Posting]) -> Vec<(usize, &'a Posting)> {
        let mut indexed: Vec<(usize, &Posting)> = postings.iter().enumerate().collect();
        match self {
            Self::Recorded => {}
            Self::Date => indexed.sort_by(|a, b| Posting::compare_by_date(a.1, b.1)),
            Self::Amount => indexed.sort_by(|a, b| Posting::compare_by_amount(a.1, b.1)),
        }
        indexed
    }
}

/// One posting line, prefixed with its index on the account
pub fn format_posting(index: usize, posting: &Posting, settings: &Settings) -> String {
    let mut line = format!(
        "#{:<3} {}  {}  {}  {}",
        index,
        posting.id,
        posting.amount().format_with_symbol(&settings.currency_symbol),
        posting.direction,
        posting.date.format(&settings.date_format),
    );
    if !posting.memo.is_empty() {
        line.push_str("  ");
        line.push_str(&posting.memo);
    }
    line
}

/// Build the report for one account
pub fn format_account_report(
    forest: &AccountForest,
    number: AccountNumber,
    order: PostingOrder,
    settings: &Settings,
) -> LedgerResult<String> {
    let record = forest
        .account(number)
        .ok_or_else(|| LedgerError::account_not_found(number))?;
    let symbol = &settings.currency_symbol;

    let mut output = String::new();
    output.push_str(&format!(
        "{} {} {}\n",
        record.number,
        record.short_label(settings.label_width),
        record.balance.format_with_symbol(symbol)
    ));

    let (subtree, root) = forest.subtree_snapshot(number)?;
    let descendants: Vec<_> = subtree.preorder(root).into_iter().skip(1).collect();
    if !descendants.is_empty() {
        output.push_str("Sub-accounts:\n");
        for (level, node) in descendants {
            let sub = subtree.record(node);
            output.push_str(&format!(
                "{}{} {} {}\n",
                "  ".repeat(level),
                sub.number,
                sub.label,
                sub.balance.format_with_symbol(symbol)
            ));
        }
    }

    output.push_str("Transactions:\n");
    if record.postings().is_empty() {
        output.push_str("  (none)\n");
    }
    for (index, posting) in order.arrange(record.postings()) {
        output.push_str("  ");
        output.push_str(&format_posting(index, posting, settings));
        output.push('\n');
    }

    Ok(output)
}
