//! Account model
//!
//! An account record holds a running balance and an ordered posting history.
//! The balance is maintained incrementally; it is never re-derived from the
//! postings, because the account source file is authoritative at load time.

use std::fmt;

use super::ids::AccountNumber;
use super::money::Money;
use super::posting::Posting;

/// A node's payload in the chart of accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub number: AccountNumber,
    pub label: String,
    pub balance: Money,
    postings: Vec<Posting>,
}

/// Collapse every run of whitespace in a label to one space and trim the ends.
/// This is the form the account source can store and read back.
pub fn normalize_label(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl AccountRecord {
    /// Create an account with no postings. The label is normalized with
    /// [`normalize_label`].
    pub fn new(number: impl Into<AccountNumber>, label: impl AsRef<str>, balance: Money) -> Self {
        Self {
            number: number.into(),
            label: normalize_label(label.as_ref()),
            balance,
            postings: Vec::new(),
        }
    }

    /// Postings in insertion order
    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }

    pub fn posting(&self, index: usize) -> Option<&Posting> {
        self.postings.get(index)
    }

    pub fn posting_count(&self) -> usize {
        self.postings.len()
    }

    /// Append a posting to the history; the balance is left alone
    pub fn replay_posting(&mut self, posting: Posting) {
        self.postings.push(posting);
    }

    /// Remove a posting from the history without touching the balance
    pub fn take_posting(&mut self, index: usize) -> Option<Posting> {
        if index < self.postings.len() {
            Some(self.postings.remove(index))
        } else {
            None
        }
    }

    /// Swap the posting at `index`, returning the old one; the balance is left alone
    pub fn replace_posting(&mut self, index: usize, posting: Posting) -> Option<Posting> {
        self.postings
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, posting))
    }

    /// Label truncated to `width` characters
    pub fn short_label(&self, width: usize) -> &str {
        match self.label.char_indices().nth(width) {
            Some((byte_idx, _)) => &self.label[..byte_idx],
            None => &self.label,
        }
    }

    /// Validate the record before it enters the forest
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if !self.number.is_positive() {
            return Err(AccountValidationError::NonPositiveNumber);
        }
        if self.label != normalize_label(&self.label) {
            return Err(AccountValidationError::UnnormalizedLabel);
        }
        Ok(())
    }
}

impl fmt::Display for AccountRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.number, self.label, self.balance)
    }
}

/// Validation errors for account records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    NonPositiveNumber,
    UnnormalizedLabel,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveNumber => write!(f, "Account number must be positive"),
            Self::UnnormalizedLabel => {
                write!(f, "Account label must be single-spaced words on one line")
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}
