//! coa-ledger - Terminal chart-of-accounts ledger
//!
//! This library keeps a forest of accounts whose parent/child relationships
//! follow the decimal digits of account numbers: `1100` sits under `1000`,
//! `123` under `12`. Postings made to an account cascade their effect to
//! every ancestor. The ledger is stored as two plain-text files.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (accounts, postings, money, ids)
//! - `forest`: The account forest, its arena and the hierarchy rules
//! - `storage`: Text codecs and atomic file storage
//! - `services`: Request handling on top of the forest and storage
//! - `display`: Terminal formatting
//! - `cli`: Command handlers and the interactive shell
//! - `logging`: Diagnostic output setup
//!
//! # Example
//!
//! ```rust
//! use coa_ledger::forest::AccountForest;
//! use coa_ledger::models::{AccountNumber, AccountRecord, Direction, Money};
//!
//! let mut forest = AccountForest::new();
//! forest.add_account(AccountRecord::new(1000u64, "Assets", Money::zero()), None)?;
//! forest.add_account(
//!     AccountRecord::new(1100u64, "Cash", Money::zero()),
//!     Some(AccountNumber::new(1000)),
//! )?;
//! forest.post_transaction(1100u64, Money::from_cents(5000), Direction::Debit)?;
//!
//! assert_eq!(forest.account(1000u64).unwrap().balance.cents(), 5000);
//! # Ok::<(), coa_ledger::error::LedgerError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod forest;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
pub use forest::AccountForest;
