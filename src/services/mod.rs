//! Service layer for coa-ledger
//!
//! The service layer applies user requests to the in-memory forest and keeps
//! the files on disk in step with it.

pub mod ledger;

pub use ledger::{AccountSummary, LedgerRequest, LedgerResponse, LedgerService, ParentChoice};
