//! Core data models for coa-ledger
//!
//! Plain data holders: account records, postings, money and identifiers.
//! The hierarchy that links accounts together lives in `forest`.

pub mod account;
pub mod ids;
pub mod money;
pub mod posting;

pub use account::{AccountRecord, AccountValidationError};
pub use ids::{AccountNumber, PostingId};
pub use money::{Money, MoneyParseError};
pub use posting::{Direction, Posting};
