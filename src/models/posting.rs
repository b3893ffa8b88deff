//! Posting model
//!
//! A posting is a single signed monetary event attached to one account.
//! Debits add to a balance, credits subtract from it.

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use super::ids::PostingId;
use super::money::Money;
use crate::error::LedgerError;

/// Side of the ledger a posting lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Adds to the balance
    Debit,
    /// Subtracts from the balance
    Credit,
}

impl Direction {
    /// Parse a direction symbol ("D"/"C", or the full word, any case)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "d" | "debit" => Some(Self::Debit),
            "c" | "credit" => Some(Self::Credit),
            _ => None,
        }
    }

    /// Single-letter symbol used in the posting log
    pub fn symbol(&self) -> char {
        match self {
            Self::Debit => 'D',
            Self::Credit => 'C',
        }
    }

    /// The opposite side
    pub fn inverse(&self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debit => write!(f, "Debit"),
            Self::Credit => write!(f, "Credit"),
        }
    }
}

impl FromStr for Direction {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| LedgerError::InvalidDirection(s.to_string()))
    }
}

/// A single monetary event on one account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub id: PostingId,
    /// Always non-negative; the sign comes from `direction`
    amount: Money,
    pub direction: Direction,
    pub date: NaiveDate,
    pub memo: String,
}

impl Posting {
    /// Create a posting, clamping a negative amount to zero
    pub fn new(id: PostingId, amount: Money, direction: Direction, date: NaiveDate) -> Self {
        Self {
            id,
            amount: clamp_amount(amount),
            direction,
            date,
            memo: String::new(),
        }
    }

    /// Create a posting with a memo
    pub fn with_memo(
        id: PostingId,
        amount: Money,
        direction: Direction,
        date: NaiveDate,
        memo: impl Into<String>,
    ) -> Self {
        let mut posting = Self::new(id, amount, direction, date);
        posting.memo = memo.into();
        posting
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Replace the amount, clamping a negative value to zero
    pub fn set_amount(&mut self, amount: Money) {
        self.amount = clamp_amount(amount);
    }

    /// The effect this posting has on a balance
    pub fn signed_amount(&self) -> Money {
        match self.direction {
            Direction::Debit => self.amount,
            Direction::Credit => -self.amount,
        }
    }

    /// Same amount on the opposite side; applying both nets to zero
    pub fn inverse(&self) -> Self {
        Self {
            direction: self.direction.inverse(),
            ..self.clone()
        }
    }

    /// Ordering helper for date-sorted reports
    pub fn compare_by_date(a: &Posting, b: &Posting) -> Ordering {
        a.date.cmp(&b.date)
    }

    /// Ordering helper for amount-sorted reports
    pub fn compare_by_amount(a: &Posting, b: &Posting) -> Ordering {
        a.amount.cmp(&b.amount)
    }
}

fn clamp_amount(amount: Money) -> Money {
    if amount.is_negative() {
        warn!(%amount, "posting amount must be non-negative; using 0.00");
        Money::zero()
    } else {
        amount
    }
}
