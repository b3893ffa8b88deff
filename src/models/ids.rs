//! Strongly-typed identifiers
//!
//! Account numbers carry the hierarchy in their decimal digits, so they get a
//! dedicated newtype with digit helpers. Posting ids are opaque strings.

use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

/// Numeric account id, printed in decimal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountNumber(u64);

impl AccountNumber {
    /// Wrap a raw number
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw number
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Number of decimal digits (0 has one digit)
    pub fn digit_count(&self) -> usize {
        let mut n = self.0;
        let mut count = 1;
        while n >= 10 {
            n /= 10;
            count += 1;
        }
        count
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AccountNumber {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<AccountNumber> for u64 {
    fn from(number: AccountNumber) -> Self {
        number.0
    }
}

impl FromStr for AccountNumber {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(LedgerError::Validation(format!(
                "Invalid account number: '{}'",
                s
            )));
        }
        let value: u64 = s
            .parse()
            .map_err(|_| LedgerError::Validation(format!("Account number too large: '{}'", s)))?;
        if value == 0 {
            return Err(LedgerError::Validation(
                "Account number must be positive".into(),
            ));
        }
        Ok(Self(value))
    }
}

/// Identifier of a single posting, generated or read back from the log
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostingId(String);

impl PostingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostingId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PostingId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
