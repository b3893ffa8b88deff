//! Ledger service
//!
//! Applies [`LedgerRequest`]s to an [`AccountForest`] and writes the ledger
//! back to disk after every change. Both the command line and the
//! interactive shell go through here.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::Settings;
use crate::display::report::{format_account_report, PostingOrder};
use crate::error::{LedgerError, LedgerResult};
use crate::forest::AccountForest;
use crate::models::{AccountNumber, AccountRecord, Direction, Money, Posting, PostingId};
use crate::storage::{write_text_atomic, LedgerStore, LoadReport};

/// Where a new account should be attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentChoice {
    /// Derived from the account number
    Implied,
    /// Always a new root
    Root,
    /// Below this account, or its nearest existing ancestor
    Explicit(AccountNumber),
}

/// One user action against the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerRequest {
    AddAccount {
        number: AccountNumber,
        label: String,
        balance: Money,
        parent: ParentChoice,
    },
    Post {
        number: AccountNumber,
        amount: Money,
        direction: Direction,
        memo: Option<String>,
    },
    DeletePosting {
        number: AccountNumber,
        index: usize,
    },
    AmendPosting {
        number: AccountNumber,
        index: usize,
        amount: Money,
        direction: Direction,
    },
    Report {
        number: AccountNumber,
        output: Option<PathBuf>,
        order: PostingOrder,
    },
    ShowTree,
    Find {
        number: AccountNumber,
    },
}

impl LedgerRequest {
    /// True for requests that change the ledger
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::AddAccount { .. }
                | Self::Post { .. }
                | Self::DeletePosting { .. }
                | Self::AmendPosting { .. }
        )
    }
}

/// An account with its position in the hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub number: AccountNumber,
    pub label: String,
    pub balance: Money,
    /// Depth below the root of its tree
    pub level: usize,
    pub children: Vec<AccountNumber>,
    pub posting_count: usize,
}

/// Result of a successfully applied request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerResponse {
    AccountAdded {
        number: AccountNumber,
        level: usize,
    },
    Posted {
        number: AccountNumber,
        posting: PostingId,
    },
    PostingDeleted {
        number: AccountNumber,
        posting: Posting,
    },
    PostingAmended {
        number: AccountNumber,
        previous: Posting,
    },
    ReportWritten {
        number: AccountNumber,
        path: PathBuf,
    },
    Tree(String),
    Found(AccountSummary),
}

/// Service owning one loaded ledger
pub struct LedgerService {
    forest: AccountForest,
    store: LedgerStore,
    settings: Settings,
    reports_dir: PathBuf,
}

impl LedgerService {
    /// Load the ledger behind `store` into a fresh forest
    pub fn open(store: LedgerStore, settings: Settings, reports_dir: PathBuf) -> LedgerResult<Self> {
        Self::open_with(AccountForest::new(), store, settings, reports_dir)
    }

    /// Load the ledger behind `store` into `forest`, replacing its contents
    pub fn open_with(
        mut forest: AccountForest,
        store: LedgerStore,
        settings: Settings,
        reports_dir: PathBuf,
    ) -> LedgerResult<Self> {
        let report: LoadReport = store.load(&mut forest)?;
        if report.accounts.skipped > 0 || report.postings.skipped > 0 {
            info!(
                accounts = report.accounts.skipped,
                postings = report.postings.skipped,
                "some ledger lines were skipped"
            );
        }

        Ok(Self {
            forest,
            store,
            settings,
            reports_dir,
        })
    }

    pub fn forest(&self) -> &AccountForest {
        &self.forest
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    /// Apply one request, saving the ledger if it changed. A change that
    /// cannot be saved is rolled back in memory as well.
    pub fn execute(&mut self, request: LedgerRequest) -> LedgerResult<LedgerResponse> {
        if !request.is_mutation() {
            return self.apply(request);
        }

        let checkpoint = self.forest.checkpoint();
        let result = self
            .apply(request)
            .and_then(|response| self.store.save(&self.forest).map(|()| response));

        if let Err(e) = &result {
            warn!(error = %e, "change not kept");
            self.forest.restore(checkpoint);
        }
        result
    }

    fn apply(&mut self, request: LedgerRequest) -> LedgerResult<LedgerResponse> {
        match request {
            LedgerRequest::AddAccount {
                number,
                label,
                balance,
                parent,
            } => {
                let parent = match parent {
                    ParentChoice::Implied => self.forest.default_parent(number),
                    ParentChoice::Root => None,
                    ParentChoice::Explicit(p) => Some(p),
                };
                self.forest
                    .add_account(AccountRecord::new(number, label, balance), parent)?;
                let level = self.forest.level_of(number).unwrap_or_default();
                Ok(LedgerResponse::AccountAdded { number, level })
            }

            LedgerRequest::Post {
                number,
                amount,
                direction,
                memo,
            } => {
                let posting = self.forest.post_transaction_with_memo(
                    number,
                    amount,
                    direction,
                    memo.unwrap_or_default(),
                )?;
                Ok(LedgerResponse::Posted { number, posting })
            }

            LedgerRequest::DeletePosting { number, index } => {
                let posting = self.forest.delete_transaction(number, index)?;
                Ok(LedgerResponse::PostingDeleted { number, posting })
            }

            LedgerRequest::AmendPosting {
                number,
                index,
                amount,
                direction,
            } => {
                let previous = self
                    .forest
                    .amend_transaction(number, index, amount, direction)?;
                Ok(LedgerResponse::PostingAmended { number, previous })
            }

            LedgerRequest::Report {
                number,
                output,
                order,
            } => {
                let contents = format_account_report(&self.forest, number, order, &self.settings)?;
                let path = output
                    .unwrap_or_else(|| self.reports_dir.join(format!("{}_report.txt", number)));
                write_text_atomic(&path, &contents)?;
                Ok(LedgerResponse::ReportWritten { number, path })
            }

            LedgerRequest::ShowTree => Ok(LedgerResponse::Tree(self.forest.render())),

            LedgerRequest::Find { number } => self.summarize(number).map(LedgerResponse::Found),
        }
    }

    /// Summary of one account
    pub fn summarize(&self, number: AccountNumber) -> LedgerResult<AccountSummary> {
        let record = self
            .forest
            .account(number)
            .ok_or_else(|| LedgerError::account_not_found(number))?;

        Ok(AccountSummary {
            number,
            label: record.label.clone(),
            balance: record.balance,
            level: self.forest.level_of(number).unwrap_or_default(),
            children: self
                .forest
                .children_of(number)
                .into_iter()
                .map(|child| child.number)
                .collect(),
            posting_count: record.posting_count(),
        })
    }
}
